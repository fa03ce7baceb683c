//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use packing_core::ErrorEnvelope;
use packing_source::SourceError;

/// Message returned when a page fails to render.
pub const RENDER_FAILED_MESSAGE: &str = "Failed to render page";

/// Errors that can occur during portal request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PortalError {
    /// The packing source could not produce data.
    #[error("packing source error: {0}")]
    Packing(#[from] SourceError),

    /// A page template failed to render.
    #[error("template error: {0}")]
    Render(#[from] tera::Error),

    /// Page data could not be encoded for the browser.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        // Detail goes to the log only; clients get a fixed message.
        let body = match &self {
            PortalError::Packing(e) => {
                tracing::error!(error = %e, "[Packing API] Error fetching packing data");
                ErrorEnvelope::fetch_failed()
            }
            PortalError::Render(_) | PortalError::Encode(_) => {
                tracing::error!(error = %self, "failed to render page");
                ErrorEnvelope::new(RENDER_FAILED_MESSAGE)
            }
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
