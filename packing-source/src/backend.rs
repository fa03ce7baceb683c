//! Packing source abstraction trait.
//!
//! Lets the portal swap the spreadsheet-backed HTTP service for a fixed
//! payload without changing the request handlers.

use async_trait::async_trait;
use packing_core::PackingBatches;

use crate::SourceError;

/// Something that can produce the current packing batches.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
/// Every call must reflect the upstream's current state; callers never cache.
///
/// # Cancel Safety
/// Implementations in this crate are cancel safe. Dropping the future
/// abandons the in-flight request and leaves no shared state behind.
#[async_trait]
pub trait PackingSource: Send + Sync {
    /// Fetch the current batch collection.
    ///
    /// # Errors
    /// Returns a [`SourceError`] describing why the data could not be fetched.
    async fn fetch_batches(&self) -> Result<PackingBatches, SourceError>;
}

/// A source that always answers the same way.
///
/// Used when no upstream is configured and in tests.
#[derive(Debug, Clone)]
pub struct StaticPackingSource {
    outcome: Result<PackingBatches, String>,
}

impl StaticPackingSource {
    /// Always resolve with `batches`.
    #[must_use]
    pub fn batches(batches: PackingBatches) -> Self {
        Self { outcome: Ok(batches) }
    }

    /// Always resolve with an empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self::batches(PackingBatches::empty())
    }

    /// Always fail with [`SourceError::Unavailable`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self { outcome: Err(reason.into()) }
    }
}

#[async_trait]
impl PackingSource for StaticPackingSource {
    async fn fetch_batches(&self) -> Result<PackingBatches, SourceError> {
        self.outcome
            .clone()
            .map_err(SourceError::Unavailable)
    }
}
