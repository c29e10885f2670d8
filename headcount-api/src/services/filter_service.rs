//! Filter Service
//!
//! Filtering with aggregation, and loading the choices for each dimension.

use headcount_core::{Dimension, FilterSummary, SiteFilter, StoreResult};
use headcount_storage::SiteStore;

/// Run the filter and total the matching rows.
///
/// Zero matches is an empty summary, not an error.
pub async fn apply_filters(store: &dyn SiteStore, filter: &SiteFilter) -> StoreResult<FilterSummary> {
    let rows = store.query(filter).await?;
    let summary = FilterSummary::from_rows(rows);
    tracing::debug!(
        region = filter.selection(Dimension::Region),
        hub = filter.selection(Dimension::Hub),
        country = filter.selection(Dimension::Country),
        site = filter.selection(Dimension::Site),
        rows = summary.rows.len(),
        total = summary.total,
        "Applied site filter"
    );
    Ok(summary)
}

/// Distinct values per dimension, for populating filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub hubs: Vec<String>,
    pub countries: Vec<String>,
    pub sites: Vec<String>,
    pub warnings: Vec<String>,
}

impl FilterOptions {
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Hub => &self.hubs,
            Dimension::Country => &self.countries,
            Dimension::Site => &self.sites,
        }
    }

    fn values_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::Hub => &mut self.hubs,
            Dimension::Country => &mut self.countries,
            Dimension::Site => &mut self.sites,
        }
    }
}

/// Load the choices for all four dimensions.
///
/// Never fails: a dimension that cannot be loaded is left empty and a warning
/// is recorded for it.
pub async fn load_filter_options(store: &dyn SiteStore) -> FilterOptions {
    let mut options = FilterOptions::default();

    for dimension in Dimension::ALL {
        match store.list_distinct(dimension).await {
            Ok(values) => *options.values_mut(dimension) = values,
            Err(e) => {
                tracing::warn!(%dimension, error = %e, "Could not load filter options");
                options
                    .warnings
                    .push(format!("Could not load {} options: {}", dimension.label(), e));
            }
        }
    }

    options
}
