use serde::{Deserialize, Serialize};

/// Build-time configuration of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub enable_logging: bool,
    pub notification_ttl_ms: u32,
    pub csv_preview_rows: usize,
    pub prediction_table_limit: usize,
    pub max_upload_bytes: u64,
    pub session_storage_key: String,
    pub sample_csv_path: String,
    pub map_config: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api".to_string(),
            enable_logging: true,
            notification_ttl_ms: 5_000,
            csv_preview_rows: 5,
            prediction_table_limit: 20,
            max_upload_bytes: 5 * 1024 * 1024,
            session_storage_key: "token".to_string(),
            sample_csv_path: "/sample_data/sample_upload.csv".to_string(),
            map_config: MapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: -5.0,
            default_center_lng: 30.0,
            default_zoom: 4.0,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables
    /// (see build.rs), falling back to [`AppConfig::default`] per key.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let map = defaults.map_config.clone();

        Self {
            api_base_url: option_env!("API_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            notification_ttl_ms: parse_or(
                option_env!("NOTIFICATION_TTL_MS"),
                defaults.notification_ttl_ms,
            ),
            csv_preview_rows: parse_or(option_env!("CSV_PREVIEW_ROWS"), defaults.csv_preview_rows),
            prediction_table_limit: parse_or(
                option_env!("PREDICTION_TABLE_LIMIT"),
                defaults.prediction_table_limit,
            ),
            max_upload_bytes: parse_or(option_env!("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes),
            session_storage_key: option_env!("SESSION_STORAGE_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.session_storage_key),
            sample_csv_path: option_env!("SAMPLE_CSV_PATH")
                .map(str::to_string)
                .unwrap_or(defaults.sample_csv_path),
            map_config: MapConfig {
                default_center_lat: parse_or(option_env!("MAP_CENTER_LAT"), map.default_center_lat),
                default_center_lng: parse_or(option_env!("MAP_CENTER_LNG"), map.default_center_lng),
                default_zoom: parse_or(option_env!("MAP_ZOOM"), map.default_zoom),
            },
        }
    }

    /// Base URL without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_contract() {
        let config = AppConfig::default();
        assert_eq!(config.notification_ttl_ms, 5_000);
        assert_eq!(config.csv_preview_rows, 5);
        assert_eq!(config.prediction_table_limit, 20);
        assert_eq!(config.session_storage_key, "token");
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("abc"), 7u32), 7);
        assert_eq!(parse_or(Some(" 12 "), 7u32), 12);
        assert_eq!(parse_or::<u32>(None, 3), 3);
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = AppConfig {
            api_base_url: "https://api.example.org/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_base_url(), "https://api.example.org");
    }
}
