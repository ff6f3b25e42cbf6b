//! MIG API client configuration

use crate::error::ClientError;
use crate::Result;

pub const DEFAULT_API_URL: &str = "http://localhost:12345/api/v1/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the MIG API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint is appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// User agent sent with each request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("mig-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create config for a specific API endpoint
    pub fn new(base_url: &str) -> Self {
        ApiConfig {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Check the base URL and normalise it to end with `/`.
    pub fn validate(mut self) -> Result<Self> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        if self.timeout_secs == 0 {
            return Err(ClientError::Config("timeout must be at least one second".to_string()));
        }
        Ok(self)
    }
}
