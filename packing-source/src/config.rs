//! Upstream connection settings.

use std::fmt;
use std::time::Duration;

/// Default time allowed for one upstream fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on the upstream response body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Configuration for [`crate::HttpPackingSource`].
#[derive(Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// Full URL of the packing endpoint on the spreadsheet-backed service.
    pub url: String,

    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,

    /// Upper bound for connect + response + body.
    pub timeout: Duration,

    /// Bodies larger than this fail with [`crate::SourceError::BodyTooLarge`].
    pub max_body_bytes: usize,
}

impl SourceConfig {
    /// Create a config for `url` with no credentials and the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

// Keeps the token out of logs.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("url", &self.url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
