//! Headcount Storage - Record Store Abstraction
//!
//! [`SiteStore`] is the contract every record store implements: distinct
//! dimension values, single-record lookup, filtered listing and the
//! transactional count update. The PostgreSQL implementation lives in the
//! API crate; [`MockSiteStore`] here keeps everything in memory for tests.

mod mock;

pub use mock::MockSiteStore;

use async_trait::async_trait;
use headcount_core::{
    CountValues, Dimension, SiteFilter, SiteId, SiteLocation, SiteRecord, StoreResult,
};

/// Record store for the `site_data` table.
///
/// Every method is one self-contained unit of work: implementations acquire
/// whatever connection they need at the start of the call and release it
/// before returning, on both success and error paths. Nothing is cached
/// between calls.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Distinct values present for one dimension, ascending.
    async fn list_distinct(&self, dimension: Dimension) -> StoreResult<Vec<String>>;

    /// Dimension fields of one record, or `None` if the id does not exist.
    async fn find_by_id(&self, id: SiteId) -> StoreResult<Option<SiteLocation>>;

    /// All records matching every constraint in `filter`, ordered by
    /// (region, hub, country, site).
    async fn query(&self, filter: &SiteFilter) -> StoreResult<Vec<SiteRecord>>;

    /// Overwrite the three counts of one record atomically.
    ///
    /// Fails with `StoreError::NotFound` when no such record exists; prior
    /// values are left intact on every failure. Concurrent updates to the same
    /// record are last-write-wins.
    async fn update_counts(&self, id: SiteId, counts: CountValues) -> StoreResult<()>;

    /// Cheap round-trip used by readiness checks.
    async fn health_check(&self) -> StoreResult<()>;
}
