use tickerboard_market_data::{Region, TimeRange};

/// Runtime defaults, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub default_range: TimeRange,
    pub default_region: Region,
    pub use_fallback: bool,
    pub pretty: bool,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_range: TimeRange::OneDay,
            default_region: Region::Us,
            use_fallback: true,
            pretty: true,
            log_format: "text".to_string(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unreadable values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_range = lookup("TB_DEFAULT_RANGE")
            .map(|r| TimeRange::parse(r.trim()))
            .unwrap_or(defaults.default_range);
        let default_region = lookup("TB_DEFAULT_REGION")
            .and_then(|r| Region::parse(&r))
            .unwrap_or(defaults.default_region);
        let use_fallback = lookup("TB_USE_FALLBACK")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.use_fallback);
        let pretty = lookup("TB_PRETTY")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.pretty);
        let log_format = lookup("TB_LOG_FORMAT").unwrap_or(defaults.log_format);

        Self {
            default_range,
            default_region,
            use_fallback,
            pretty,
            log_format,
        }
    }
}
