//! Application configuration loaded from environment variables.

/// Default name of the variable exposed by `GET /api/test/environment`.
pub const DEFAULT_ENVIRONMENT_VAR: &str = "PDV_ENVIRONMENT";

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `"json"` for JSON log lines, anything else for plain text
/// - `PDV_ENVIRONMENT_VAR` — name of the variable reporting the deployment
///   environment (default: `"PDV_ENVIRONMENT"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub json_logs: bool,
    pub environment_var: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            environment_var: std::env::var("PDV_ENVIRONMENT_VAR")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.environment_var),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            json_logs: false,
            environment_var: DEFAULT_ENVIRONMENT_VAR.to_string(),
        }
    }
}
