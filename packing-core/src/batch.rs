//! Packing batch payloads and the JSON envelopes they travel in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Message returned to clients whenever packing data cannot be fetched.
///
/// The underlying failure is only ever logged server-side.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch packing data";

/// Opaque collection of packing records as served by the upstream sheet.
///
/// The portal never inspects the shape; it forwards the document verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackingBatches(pub Value);

impl PackingBatches {
    /// Wraps an already-parsed JSON document.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty batch list (`[]`).
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Array(Vec::new()))
    }

    /// Parses a raw upstream body.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedPayload`] if `bytes` is not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes)
            .map(Self)
            .map_err(|e| CoreError::MalformedPayload { reason: e.to_string() })
    }

    /// Returns the inner JSON document.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for PackingBatches {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Success body of the packing endpoint: `{"batches": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchesEnvelope {
    pub batches: PackingBatches,
}

impl From<PackingBatches> for BatchesEnvelope {
    fn from(batches: PackingBatches) -> Self {
        Self { batches }
    }
}

/// Failure body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }

    /// The fixed body used for every packing fetch failure.
    #[must_use]
    pub fn fetch_failed() -> Self {
        Self::new(FETCH_FAILED_MESSAGE)
    }
}
