//! Client configuration.

use std::time::Duration;

/// The mock API the app was built against
pub const DEFAULT_BASE_URL: &str = "https://68355da3cd78db2058c11959.mockapi.io/api/v1";

/// Configuration for connecting to the expense API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the API prefix (e.g., "https://host/api/v1")
    pub base_url: String,
    /// Bearer token sent with every request (if signed in)
    pub access_token: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Create a config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(base_url)
        }
    }

    /// Override both timeouts.
    #[must_use]
    pub fn timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
