//! Panel configuration
//!
//! Read from the environment after `.env` has been loaded.

use std::path::PathBuf;

use backoffice_client::ClientConfig;

/// Panel configuration
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub client: ClientConfig,
    /// Default log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// JSON log lines instead of the human-readable format
    pub log_json: bool,
    /// Directory for the daily log file; logs go to stderr when unset
    pub log_dir: Option<PathBuf>,
}

impl PanelConfig {
    /// `PANEL_API_URL`, `PANEL_HTTP_TIMEOUT`, `PANEL_TOKEN_PATH`,
    /// `PANEL_LOG_LEVEL`, `PANEL_LOG_JSON` and `PANEL_LOG_DIR`
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            log_level: std::env::var("PANEL_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("PANEL_LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true"))
                .unwrap_or(false),
            log_dir: std::env::var("PANEL_LOG_DIR").ok().map(PathBuf::from),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.client.base_url = url.into();
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}
