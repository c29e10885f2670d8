//! Headcount Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for locations, counts, records and filters
//! - Fixtures built on the in-memory store
//! - Assertions for the filter/aggregate contract

// Re-export mock storage from its source crate
pub use headcount_storage::{MockSiteStore, SiteStore};

// Re-export core types for convenience
pub use headcount_core::{
    CountValues, Dimension, FilterSummary, SiteFilter, SiteId, SiteLocation, SiteRecord,
    StoreError, SEED_SITES,
};

use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// Store holding the eight-row sample dataset.
pub fn seeded_store() -> MockSiteStore {
    MockSiteStore::seeded()
}

/// Store holding the given rows, ids assigned in order from 1.
pub fn store_with(rows: &[(SiteLocation, CountValues)]) -> MockSiteStore {
    let store = MockSiteStore::new();
    for (location, counts) in rows {
        store.insert(location.clone(), *counts);
    }
    store
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Small value pools so generated filters actually hit generated rows.
const REGIONS: &[&str] = &["AMER", "APAC", "EMEA"];
const HUBS: &[&str] = &["Hub A", "Hub B", "Hub C", "Hub D"];
const COUNTRIES: &[&str] = &["USA", "Canada", "India", "UK", "Japan", "Germany"];
const SITES: &[&str] = &["Site 1", "Site 2", "Site 3", "Site 4", "Site 5", "Site 6"];

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(pool).prop_map(str::to_string)
}

/// Strategy for generating site locations.
pub fn arb_location() -> impl Strategy<Value = SiteLocation> {
    (pick(REGIONS), pick(HUBS), pick(COUNTRIES), pick(SITES))
        .prop_map(|(region, hub, country, site)| SiteLocation::new(region, hub, country, site))
}

/// Strategy for generating non-negative counts.
pub fn arb_counts() -> impl Strategy<Value = CountValues> {
    (0..10_000i32, 0..10_000i32, 0..10_000i32)
        .prop_map(|(rse, dse, itc)| CountValues::new(rse, dse, itc))
}

/// Strategy for generating table contents.
pub fn arb_rows(max: usize) -> impl Strategy<Value = Vec<(SiteLocation, CountValues)>> {
    prop::collection::vec((arb_location(), arb_counts()), 0..=max)
}

fn arb_selection(pool: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some("All".to_string())),
        3 => pick(pool).prop_map(Some),
        1 => "[A-Z][a-z]{2,6}".prop_map(Some),
    ]
}

/// Strategy for generating filters, including "All" and values absent from
/// the generated data.
pub fn arb_filter() -> impl Strategy<Value = SiteFilter> {
    (
        arb_selection(REGIONS),
        arb_selection(HUBS),
        arb_selection(COUNTRIES),
        arb_selection(SITES),
    )
        .prop_map(|(region, hub, country, site)| {
            SiteFilter::from_selections(region, hub, country, site)
        })
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Assert a summary's total is exactly the sum over its rows.
pub fn assert_total_matches_rows(summary: &FilterSummary) {
    let expected: i64 = summary
        .rows
        .iter()
        .map(|r| i64::from(r.rse_count) + i64::from(r.dse_count) + i64::from(r.itc_count))
        .sum();
    assert_eq!(summary.total, expected, "total must equal the sum over returned rows");
}

/// Assert rows are in (region, hub, country, site) order.
pub fn assert_listing_order(rows: &[SiteRecord]) {
    for pair in rows.windows(2) {
        assert!(
            pair[0].sort_key() <= pair[1].sort_key(),
            "rows out of order: {:?} before {:?}",
            pair[0].sort_key(),
            pair[1].sort_key()
        );
    }
}
