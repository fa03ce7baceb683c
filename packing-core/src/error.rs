/// Errors produced by the `packing-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A packing payload was not a valid JSON document.
    #[error("malformed packing payload: {reason}")]
    MalformedPayload { reason: String },
}
