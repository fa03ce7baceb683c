//! Core types for the packing portal.
//!
//! Defines the payloads exchanged with the spreadsheet-backed packing
//! service, the JSON envelopes the portal answers with, and the redirect
//! target carried through the authentication pages.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod batch;
pub mod error;
pub mod redirect;

pub use batch::{BatchesEnvelope, ErrorEnvelope, PackingBatches, FETCH_FAILED_MESSAGE};
pub use error::CoreError;
pub use redirect::RedirectTarget;
