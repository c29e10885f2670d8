//! In-memory record store for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use headcount_core::{
    seed_sites, CountValues, Dimension, SiteFilter, SiteId, SiteLocation, SiteRecord, StoreError,
    StoreResult,
};

use crate::SiteStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<SiteId, SiteRecord>,
    last_id: SiteId,
}

/// In-memory [`SiteStore`].
///
/// Ids are assigned monotonically from 1. The store can be switched offline
/// to simulate an unreachable database, and counts every trait call so tests
/// can assert that a code path never touched the store.
#[derive(Debug, Clone, Default)]
pub struct MockSiteStore {
    table: Arc<RwLock<Table>>,
    offline: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockSiteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the eight-row sample dataset (ids 1..=8).
    pub fn seeded() -> Self {
        let store = Self::new();
        for (location, counts) in seed_sites() {
            store.insert(location, counts);
        }
        store
    }

    /// Insert a record and return its new id.
    pub fn insert(&self, location: SiteLocation, counts: CountValues) -> SiteId {
        let mut table = self.table.write().unwrap_or_else(|e| e.into_inner());
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, SiteRecord::new(id, location, counts));
        id
    }

    /// Direct read that bypasses the trait (and the call counter).
    pub fn get(&self, id: SiteId) -> Option<SiteRecord> {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        table.rows.get(&id).cloned()
    }

    /// Snapshot of every record in id order.
    pub fn snapshot(&self) -> Vec<SiteRecord> {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        table.rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(|e| e.into_inner()).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Simulate the database becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of [`SiteStore`] calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::connection("mock store is offline"));
        }
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Table>> {
        self.begin()?;
        self.table
            .read()
            .map_err(|_| StoreError::query("storage lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Table>> {
        self.begin()?;
        self.table
            .write()
            .map_err(|_| StoreError::query("storage lock poisoned"))
    }
}

#[async_trait]
impl SiteStore for MockSiteStore {
    async fn list_distinct(&self, dimension: Dimension) -> StoreResult<Vec<String>> {
        let table = self.read()?;
        let values: BTreeSet<&str> = table.rows.values().map(|r| r.dimension(dimension)).collect();
        Ok(values.into_iter().map(str::to_string).collect())
    }

    async fn find_by_id(&self, id: SiteId) -> StoreResult<Option<SiteLocation>> {
        let table = self.read()?;
        Ok(table.rows.get(&id).map(SiteRecord::location))
    }

    async fn query(&self, filter: &SiteFilter) -> StoreResult<Vec<SiteRecord>> {
        let table = self.read()?;
        let mut rows: Vec<SiteRecord> = table
            .rows
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(rows)
    }

    async fn update_counts(&self, id: SiteId, counts: CountValues) -> StoreResult<()> {
        let mut table = self.write()?;
        let record = table.rows.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        record.set_counts(counts);
        tracing::debug!(id, ?counts, "mock store counts updated");
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.begin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headcount_core::FilterSummary;

    #[tokio::test]
    async fn test_seeded_store_lists_all_in_order() {
        let store = MockSiteStore::seeded();
        let rows = store.query(&SiteFilter::all()).await.unwrap();
        assert_eq!(rows.len(), 8);

        let sites: Vec<&str> = rows.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(
            sites,
            vec!["Site 6", "Site 5", "Site 8", "Site 1", "Site 2", "Site 7", "Site 3", "Site 4"]
        );
    }

    #[tokio::test]
    async fn test_list_distinct_is_sorted_and_unique() {
        let store = MockSiteStore::seeded();
        let regions = store.list_distinct(Dimension::Region).await.unwrap();
        assert_eq!(regions, vec!["AMER", "APAC", "EMEA"]);

        let countries = store.list_distinct(Dimension::Country).await.unwrap();
        assert_eq!(countries, vec!["Canada", "Germany", "India", "Japan", "UK", "USA"]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MockSiteStore::seeded();
        let location = store.find_by_id(5).await.unwrap().unwrap();
        assert_eq!(location, SiteLocation::new("AMER", "Hub C", "USA", "Site 5"));
        assert!(store.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_unknown_value_yields_nothing() {
        let store = MockSiteStore::seeded();
        let filter = SiteFilter::all().with(Dimension::Region, "LATAM");
        let summary = FilterSummary::from_rows(store.query(&filter).await.unwrap());
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0);
    }

    #[tokio::test]
    async fn test_update_counts_changes_only_counts() {
        let store = MockSiteStore::seeded();
        let before = store.snapshot();

        store
            .update_counts(3, CountValues::new(10, 20, 30))
            .await
            .unwrap();

        let after = store.snapshot();
        for (b, a) in before.iter().zip(after.iter()) {
            if b.id == 3 {
                assert_eq!(a.counts(), CountValues::new(10, 20, 30));
                assert_eq!(a.location(), b.location());
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_store_unchanged() {
        let store = MockSiteStore::seeded();
        let before = store.snapshot();

        let err = store
            .update_counts(42, CountValues::new(1, 1, 1))
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::NotFound { id: 42 });
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_offline_store_reports_connection_failure() {
        let store = MockSiteStore::seeded();
        store.set_offline(true);

        let err = store.list_distinct(Dimension::Hub).await.unwrap_err();
        assert!(matches!(err, StoreError::ConnectionFailure { .. }));
        assert!(store.health_check().await.is_err());

        store.set_offline(false);
        assert!(store.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MockSiteStore::new();
        let a = store.insert(SiteLocation::new("R", "H", "C", "S1"), CountValues::default());
        let b = store.insert(SiteLocation::new("R", "H", "C", "S2"), CountValues::default());
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_call_counter_tracks_trait_calls_only() {
        let store = MockSiteStore::seeded();
        assert_eq!(store.call_count(), 0);
        let _ = store.get(1);
        assert_eq!(store.call_count(), 0);
        let _ = store.find_by_id(1).await;
        assert_eq!(store.call_count(), 1);
    }
}
