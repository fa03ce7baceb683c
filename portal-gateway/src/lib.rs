//! HTTP front end for the packing portal.
//!
//! Serves the marketing pages, the hosted sign-up and sign-in pages, and
//! `GET /api/packing`, a read-only proxy onto the spreadsheet-backed
//! packing data service.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
pub mod views;
