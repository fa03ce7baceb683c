//! Startup configuration read from the process environment.

use std::time::Duration;

use packing_source::SourceConfig;

/// Bind address used when `PORTAL_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Browser bundle of the hosted authentication widget.
pub const DEFAULT_WIDGET_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/@clerk/clerk-js@5/dist/clerk.browser.js";

pub const ENV_LISTEN_ADDR: &str = "PORTAL_LISTEN_ADDR";
pub const ENV_SOURCE_URL: &str = "PACKING_SOURCE_URL";
pub const ENV_SOURCE_TOKEN: &str = "PACKING_SOURCE_TOKEN";
pub const ENV_SOURCE_TIMEOUT_MS: &str = "PACKING_SOURCE_TIMEOUT_MS";
pub const ENV_PUBLISHABLE_KEY: &str = "AUTH_PUBLISHABLE_KEY";
pub const ENV_WIDGET_SCRIPT_URL: &str = "AUTH_WIDGET_SCRIPT_URL";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },

    /// A variable is set but cannot be used.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Settings for the hosted authentication widget.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct AuthConfig {
    /// Publishable (browser-safe) key identifying the auth instance.
    pub publishable_key: String,

    /// URL the widget bundle is loaded from.
    pub script_url: String,
}

impl AuthConfig {
    /// Config for `publishable_key` loading the default widget bundle.
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            script_url: DEFAULT_WIDGET_SCRIPT_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }
}

/// Complete portal configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PortalConfig {
    pub listen_addr: String,

    /// `None` when no upstream is configured.
    pub source: Option<SourceConfig>,

    pub auth: AuthConfig,
}

impl PortalConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// See [`PortalConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if `AUTH_PUBLISHABLE_KEY` is absent, or
    /// [`ConfigError::Invalid`] if `PACKING_SOURCE_TIMEOUT_MS` is not a
    /// positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

        let listen_addr = get(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());

        let publishable_key =
            get(ENV_PUBLISHABLE_KEY).ok_or(ConfigError::Missing { var: ENV_PUBLISHABLE_KEY })?;
        let mut auth = AuthConfig::new(publishable_key);
        if let Some(url) = get(ENV_WIDGET_SCRIPT_URL) {
            auth = auth.with_script_url(url);
        }

        let source = match get(ENV_SOURCE_URL) {
            None => None,
            Some(url) => {
                let mut config = SourceConfig::new(url);
                if let Some(token) = get(ENV_SOURCE_TOKEN) {
                    config = config.with_bearer_token(token);
                }
                if let Some(raw) = get(ENV_SOURCE_TIMEOUT_MS) {
                    config = config.with_timeout(parse_timeout(&raw)?);
                }
                Some(config)
            }
        };

        Ok(Self { listen_addr, source, auth })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var: ENV_SOURCE_TIMEOUT_MS,
            reason: "must be greater than zero".to_owned(),
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(ConfigError::Invalid { var: ENV_SOURCE_TIMEOUT_MS, reason: e.to_string() }),
    }
}
