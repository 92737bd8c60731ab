//! Client configuration

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ClientResult;
use crate::http::NetworkHttpClient;
use crate::storage::FileTokenStore;

/// Default backend URL when `PANEL_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default location of the persisted bearer token
pub const DEFAULT_TOKEN_PATH: &str = ".panel/session.json";

/// Client configuration for connecting to the back-office REST API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// File holding the persisted bearer token
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }

    /// Read `PANEL_API_URL`, `PANEL_HTTP_TIMEOUT` and `PANEL_TOKEN_PATH`
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PANEL_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        if let Some(timeout) = std::env::var("PANEL_HTTP_TIMEOUT")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        if let Ok(path) = std::env::var("PANEL_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set where the bearer token is persisted
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Create an HTTP client backed by the file token store
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        let tokens = Arc::new(FileTokenStore::new(&self.token_path));
        NetworkHttpClient::new(self, tokens)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
