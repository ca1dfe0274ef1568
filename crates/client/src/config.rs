//! Client configuration loaded from environment variables.

/// Status client configuration.
///
/// Reads from environment variables:
/// - `PDV_API_URL` — base URL of the status service (default: `"http://localhost:5000"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `"json"` for JSON log lines
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub log_level: String,
    pub json_logs: bool,
}

impl ClientConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("PDV_API_URL")
                .ok()
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
