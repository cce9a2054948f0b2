use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cache_enabled: bool,
    pub cache_duration_secs: u64,
    pub default_bg: String,
    pub default_fg: String,
    pub swatch_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080),
            // Cache configuration
            cache_enabled: lookup("CACHE_ENABLED").is_some_and(|v| v == "true"),
            cache_duration_secs: lookup("CACHE_DURATION_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            default_bg: lookup("DEFAULT_BG").unwrap_or_else(|| "#ffffff".to_string()),
            default_fg: lookup("DEFAULT_FG").unwrap_or_else(|| "#777777".to_string()),
            swatch_height: lookup("SWATCH_HEIGHT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(40),
        }
    }
}
