use actix_web::{web, App, HttpServer, Responder, HttpResponse, HttpRequest};
use anyhow::Context;
use askama::Template;
use lazy_static::lazy_static;
use log::{info, error};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::color;
use crate::config::Config;
use crate::sweep::{evaluate, SweepResult};
use crate::templates::{ContrastReportTemplate, PaletteSvgTemplate, Swatch};

lazy_static! {
    static ref MEMORY_CACHE: Mutex<HashMap<String, (SweepResult, u64)>> = Mutex::new(HashMap::new());
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

fn lock_cache() -> std::sync::MutexGuard<'static, HashMap<String, (SweepResult, u64)>> {
    MEMORY_CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Drops cache entries older than `ttl_secs`, returning how many were removed.
pub fn evict_expired(now: u64, ttl_secs: u64) -> usize {
    let mut cache = lock_cache();
    let before = cache.len();
    cache.retain(|_, &mut (_, timestamp)| now.saturating_sub(timestamp) < ttl_secs);
    before - cache.len()
}

/// Reads `key` from the query, falling back to `default`. A missing `#` is
/// added before the strict format check.
fn color_param(params: &HashMap<String, String>, key: &str, default: &str) -> Result<String, String> {
    let raw = params.get(key).map(|v| v.trim()).unwrap_or(default);
    let value = if raw.starts_with('#') { raw.to_string() } else { format!("#{}", raw) };
    if color::is_valid_input(&value) {
        Ok(value)
    } else {
        Err(format!("Invalid {} color: {:?}", key, raw))
    }
}

fn color_pair(req: &HttpRequest, config: &Config) -> Result<(String, String), String> {
    let params: HashMap<_, _> = url::form_urlencoded::parse(req.query_string().as_bytes()).into_owned().collect();
    let bg = color_param(&params, "bg", &config.default_bg)?;
    let fg = color_param(&params, "fg", &config.default_fg)?;
    Ok((bg, fg))
}

pub fn prepare_swatches(result: &SweepResult) -> Vec<Swatch> {
    let band_starts: HashSet<usize> = result.bands.iter().map(|b| b.start).collect();
    result.samples.iter().enumerate().map(|(i, sample)| {
        let mut classes = Vec::new();
        if band_starts.contains(&i) {
            classes.push(sample.tier.as_str());
        }
        if sample.is_current {
            classes.push("current");
        }
        if sample.is_background {
            classes.push("bgcurrent");
        }
        Swatch {
            x: i,
            color: sample.hex.clone(),
            class: classes.join(" "),
            title: format!("{}: {} ({})", sample.hex, crate::contrast::format_ratio(sample.ratio), sample.tier),
        }
    }).collect()
}

fn add_widget_headers(builder: &mut actix_web::HttpResponseBuilder) {
    builder.insert_header(("Widget-Title", "Color Contrast"));
    builder.insert_header(("Widget-Content-Type", "html"));
}

async fn get_result(bg: &str, fg: &str, config: &Config) -> anyhow::Result<SweepResult> {
    let key = format!("{}/{}", color::normalize_hex(bg)?, color::normalize_hex(fg)?);
    let now = now_secs();

    if config.cache_enabled {
        let cached = lock_cache().get(&key).cloned();
        if let Some((result, timestamp)) = cached {
            if now.saturating_sub(timestamp) < config.cache_duration_secs {
                return Ok(result);
            }
        }
    }

    let result = evaluate(bg, fg).with_context(|| format!("evaluating {} on {}", fg, bg))?;
    if config.cache_enabled {
        lock_cache().insert(key, (result.clone(), now));
    }
    Ok(result)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/contrast", web::get().to(report_handler))
        .route("/contrast/palette.svg", web::get().to(palette_svg_handler))
        .route("/api/contrast", web::get().to(json_handler));
}

pub async fn run_api_server() -> std::io::Result<()> {
    let config = Config::from_env();

    info!("Starting API server on {}:{}", config.host, config.port);
    info!("Cache enabled: {}, duration: {}s", config.cache_enabled, config.cache_duration_secs);

    if config.cache_enabled {
        let ttl = config.cache_duration_secs;
        tokio::spawn(async move {
            let interval = std::time::Duration::from_secs(60);
            loop {
                tokio::time::sleep(interval).await;
                let removed = evict_expired(now_secs(), ttl);
                if removed > 0 {
                    info!("Memory cache cleaned: {} entries expired", removed);
                }
            }
        });
    }

    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}

async fn report_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let (bg, fg) = match color_pair(&req, &config) {
        Ok(pair) => pair,
        Err(e) => return HttpResponse::BadRequest().body(e),
    };
    info!("Received /contrast request for {} on {}", fg, bg);
    match get_result(&bg, &fg, &config).await {
        Ok(result) => {
            let template = ContrastReportTemplate {
                result: &result,
                swatches: prepare_swatches(&result),
            };
            match template.render() {
                Ok(body) => {
                    let mut builder = HttpResponse::Ok();
                    add_widget_headers(&mut builder);
                    builder.content_type("text/html").body(body)
                },
                Err(e) => {
                    error!("Template error for {} on {}: {}", fg, bg, e);
                    HttpResponse::InternalServerError().body(format!("Template error: {}", e))
                },
            }
        },
        Err(e) => {
            error!("Failed to evaluate {} on {}: {:#}", fg, bg, e);
            HttpResponse::InternalServerError().body(format!("{:#}", e))
        },
    }
}

async fn palette_svg_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let (bg, fg) = match color_pair(&req, &config) {
        Ok(pair) => pair,
        Err(e) => return HttpResponse::BadRequest().body(e),
    };
    info!("Received /contrast/palette.svg request for {} on {}", fg, bg);
    match get_result(&bg, &fg, &config).await {
        Ok(result) => {
            let template = PaletteSvgTemplate {
                result: &result,
                swatches: prepare_swatches(&result),
                height: config.swatch_height,
            };
            match template.render() {
                Ok(body) => {
                    let mut builder = HttpResponse::Ok();
                    add_widget_headers(&mut builder);
                    builder.content_type("image/svg+xml").body(body)
                },
                Err(e) => {
                    error!("Template error for {} on {}: {}", fg, bg, e);
                    HttpResponse::InternalServerError().body(format!("Template error: {}", e))
                },
            }
        },
        Err(e) => {
            error!("Failed to evaluate {} on {}: {:#}", fg, bg, e);
            HttpResponse::InternalServerError().body(format!("{:#}", e))
        },
    }
}

async fn json_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let (bg, fg) = match color_pair(&req, &config) {
        Ok(pair) => pair,
        Err(e) => return HttpResponse::BadRequest().body(e),
    };
    info!("Received /api/contrast request for {} on {}", fg, bg);
    match get_result(&bg, &fg, &config).await {
        Ok(result) => HttpResponse::Ok().json(&result),
        Err(e) => {
            error!("Failed to evaluate {} on {}: {:#}", fg, bg, e);
            HttpResponse::InternalServerError().body(format!("{:#}", e))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn color_param_adds_missing_hash() {
        let p = params(&[("bg", "fff"), ("fg", "#777777")]);
        assert_eq!(color_param(&p, "bg", "#000"), Ok("#fff".to_string()));
        assert_eq!(color_param(&p, "fg", "#000"), Ok("#777777".to_string()));
        assert_eq!(color_param(&p, "other", "#000"), Ok("#000".to_string()));
    }

    #[test]
    fn color_param_rejects_bad_values() {
        let p = params(&[("bg", "#12"), ("fg", "red")]);
        assert!(color_param(&p, "bg", "#000").is_err());
        assert!(color_param(&p, "fg", "#000").is_err());
    }

    #[test]
    fn swatches_mark_band_starts_and_current() {
        let result = evaluate("#ffffff", "#777777").unwrap();
        let swatches = prepare_swatches(&result);
        assert_eq!(swatches.len(), result.samples.len());
        assert_eq!(swatches[0].class, "aaa");
        assert_eq!(swatches[1].class, "");
        assert_eq!(swatches[0x77].class, "current");
        assert_eq!(swatches[0x78].class, "aa-large");
        assert_eq!(swatches[255].class, "bgcurrent");
        assert_eq!(swatches[0x77].title, "#777777: 4.5 (aa)");
    }

    #[actix_web::test]
    async fn cache_is_keyed_by_normalized_pair_and_expires() {
        let config = Config { cache_enabled: true, cache_duration_secs: 600, ..Config::default() };
        let key = "#eeeeee/#112233";

        let first = get_result("#eeeeee", "#112233", &config).await.unwrap();
        assert_eq!(first.ratio_text, "13.9");
        let (_, timestamp) = lock_cache().get(key).cloned().expect("result should be cached");

        // a fresh entry is served as-is, whatever spelling the request used
        let mut marked = first.clone();
        marked.ratio_text = "cached".into();
        lock_cache().insert(key.into(), (marked, timestamp));
        let hit = get_result("#eee", "#123", &config).await.unwrap();
        assert_eq!(hit.ratio_text, "cached");

        let mut stale = first.clone();
        stale.ratio_text = "stale".into();
        lock_cache().insert(key.into(), (stale, 0));
        let recomputed = get_result("#EEE", "#112233", &config).await.unwrap();
        assert_eq!(recomputed, first);
        assert_eq!(lock_cache().get(key).map(|(r, _)| r.ratio_text.clone()).as_deref(), Some(first.ratio_text.as_str()));
    }

    #[actix_web::test]
    async fn disabled_cache_stores_nothing() {
        let config = Config::default();
        get_result("#dddddd", "#221100", &config).await.unwrap();
        assert!(!lock_cache().contains_key("#dddddd/#221100"));
    }

    #[test]
    fn evicts_only_expired_entries() {
        let result = evaluate("#000000", "#ffffff").unwrap();
        {
            let mut cache = lock_cache();
            cache.insert("evict-test/old".into(), (result.clone(), 100));
            cache.insert("evict-test/new".into(), (result, 1_000));
        }
        evict_expired(1_050, 500);
        let cache = lock_cache();
        assert!(!cache.contains_key("evict-test/old"));
        assert!(cache.contains_key("evict-test/new"));
    }
}
