use actix_web::{test, web, App};
use glance_contrast::api::configure;
use glance_contrast::config::Config;
use pretty_assertions::assert_eq;
use serde_json::Value;

macro_rules! app {
    () => {
        test::init_service(App::new().app_data(web::Data::new(Config::default())).configure(configure)).await
    };
}

#[actix_web::test]
async fn json_reports_bands_and_tier() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/contrast?bg=%23ffffff&fg=%23777777").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ratio"], 4.5);
    assert_eq!(body["ratio_text"], "4.5");
    assert_eq!(body["tier"], "aa");
    assert_eq!(body["suggestion"], Value::Null);
    let tiers: Vec<&str> = body["bands"].as_array().unwrap().iter().map(|b| b["tier"].as_str().unwrap()).collect();
    assert_eq!(tiers, vec!["aaa", "aa", "aa-large", "fail"]);
    assert_eq!(body["samples"].as_array().unwrap().len(), 256);
}

#[actix_web::test]
async fn hash_is_optional_in_query() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/contrast?bg=fff&fg=ffff00").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["background"], "#ffffff");
    assert_eq!(body["foreground"], "#ffff00");
    assert_eq!(body["tier"], "fail");
    assert_eq!(body["message"], "Fails WCAG 2.0 :-(");
    assert!(body["suggestion"].is_string());
    assert_eq!(body["suggestion"], body["recommendation"]);
}

#[actix_web::test]
async fn missing_params_use_defaults() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/contrast").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["background"], "#ffffff");
    assert_eq!(body["foreground"], "#777777");
}

#[actix_web::test]
async fn invalid_color_is_bad_request() {
    let app = app!();
    for uri in ["/api/contrast?bg=%2312", "/contrast?fg=notacolor", "/contrast/palette.svg?fg=%23ffff"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{uri}");
    }
}

#[actix_web::test]
async fn report_renders_message_and_levels() {
    let app = app!();
    let req = test::TestRequest::get().uri("/contrast?bg=%23ffffff&fg=%23ffff00").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("Widget-Content-Type").unwrap(), "html");

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Fails WCAG 2.0 :-("));
    assert!(body.contains(r#"<tr class="aa-large">"#));
    assert!(body.contains(r#"class="current""#));
    assert!(body.contains(r#"class="reco""#));
}

#[actix_web::test]
async fn report_hides_recommendation_when_passing() {
    let app = app!();
    let req = test::TestRequest::get().uri("/contrast?bg=%23ffffff&fg=%23000000").to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(body.contains("Passes AAA level for any size text"));
    assert!(!body.contains(r#"class="reco""#));
}

#[actix_web::test]
async fn palette_svg_has_one_rect_per_sample() {
    let app = app!();
    let req = test::TestRequest::get().uri("/contrast/palette.svg?bg=%23ffffff&fg=%23777").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/svg+xml");

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert_eq!(body.matches("<rect ").count(), 256);
    assert!(body.contains(r##"fill="#777777" class="current""##));
}
