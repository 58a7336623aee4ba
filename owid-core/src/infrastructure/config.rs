//! HTTP resolver configuration.

use std::time::Duration;

/// Configuration for [`HttpSignerResolver`](crate::HttpSignerResolver).
#[derive(Debug, Clone)]
pub struct HttpResolverConfig {
    /// URL scheme used to reach signer endpoints.
    pub scheme: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpResolverConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl HttpResolverConfig {
    /// Returns the request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
