//! Accessors for the spreadsheet-backed packing data service.
//!
//! The portal reads packing batches through the [`PackingSource`] trait.
//! [`HttpPackingSource`] talks to the real upstream; [`StaticPackingSource`]
//! answers with a fixed payload for local development and tests.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::{PackingSource, StaticPackingSource};
pub use config::SourceConfig;
pub use error::SourceError;
pub use http::HttpPackingSource;
