//! Error types for the packing-source crate.

use std::time::Duration;

use packing_core::CoreError;

/// Errors that can occur while fetching packing data from upstream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The configured upstream URL could not be parsed.
    #[error("invalid upstream URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The upstream URL uses a scheme the client cannot speak.
    #[error("unsupported scheme in upstream URL '{url}': expected http or https")]
    UnsupportedScheme { url: String },

    /// The outgoing request could not be built.
    #[error("failed to build request: {0}")]
    Request(String),

    /// Connection or protocol failure talking to the upstream.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream did not answer within the configured timeout.
    #[error("upstream timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },

    /// The upstream body exceeded the configured size cap.
    #[error("upstream body exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream body was not a usable payload.
    #[error(transparent)]
    Malformed(#[from] CoreError),

    /// A fixed source configured to fail.
    #[error("packing source unavailable: {0}")]
    Unavailable(String),
}
