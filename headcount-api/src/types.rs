//! API Request and Response Types
//!
//! JSON shapes for the site routes. The domain types from `headcount-core`
//! are reused directly where their wire form is already right.

use headcount_core::{
    CountValues, Dimension, FilterSummary, SiteFilter, SiteId, SiteLocation, SiteRecord,
    NO_CONSTRAINT,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::{CommittedEdit, FilterOptions};

// ============================================================================
// FILTER TYPES
// ============================================================================

/// Dimension selections for filtering and export.
///
/// A missing field, an empty string or `"All"` leaves that dimension
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterRequest {
    #[serde(default)]
    pub region_filter: Option<String>,
    #[serde(default)]
    pub hub_filter: Option<String>,
    #[serde(default)]
    pub country_filter: Option<String>,
    #[serde(default)]
    pub site_filter: Option<String>,
}

impl From<FilterRequest> for SiteFilter {
    fn from(req: FilterRequest) -> Self {
        SiteFilter::from_selections(
            req.region_filter,
            req.hub_filter,
            req.country_filter,
            req.site_filter,
        )
    }
}

/// One table row with its Total Associates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SiteRow {
    pub id: SiteId,
    pub region: String,
    pub hub: String,
    pub country: String,
    pub site: String,
    pub rse_count: i32,
    pub dse_count: i32,
    pub itc_count: i32,
    pub total_associates: i64,
}

impl From<SiteRecord> for SiteRow {
    fn from(record: SiteRecord) -> Self {
        let total_associates = record.total();
        Self {
            id: record.id,
            region: record.region,
            hub: record.hub,
            country: record.country,
            site: record.site,
            rse_count: record.rse_count,
            dse_count: record.dse_count,
            itc_count: record.itc_count,
            total_associates,
        }
    }
}

/// Filtered rows plus the echoed selections and their aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterResponse {
    /// Selected region, or "All"
    pub region: String,
    /// Selected hub, or "All"
    pub hub: String,
    /// Selected country, or "All"
    pub country: String,
    /// Selected site, or "All"
    pub site: String,
    /// Sum of Total Associates over `rows`
    pub total_count: i64,
    pub rows: Vec<SiteRow>,
}

impl FilterResponse {
    pub fn new(filter: &SiteFilter, summary: FilterSummary) -> Self {
        Self {
            region: filter.selection(Dimension::Region).to_string(),
            hub: filter.selection(Dimension::Hub).to_string(),
            country: filter.selection(Dimension::Country).to_string(),
            site: filter.selection(Dimension::Site).to_string(),
            total_count: summary.total,
            rows: summary.rows.into_iter().map(SiteRow::from).collect(),
        }
    }
}

/// Distinct values available for each filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterOptionsResponse {
    pub regions: Vec<String>,
    pub hubs: Vec<String>,
    pub countries: Vec<String>,
    pub sites: Vec<String>,
    /// Sentinel that clears a selection
    pub all: String,
    /// One entry per dimension whose values could not be loaded
    pub warnings: Vec<String>,
}

impl From<FilterOptions> for FilterOptionsResponse {
    fn from(options: FilterOptions) -> Self {
        Self {
            regions: options.regions,
            hubs: options.hubs,
            countries: options.countries,
            sites: options.sites,
            all: NO_CONSTRAINT.to_string(),
            warnings: options.warnings,
        }
    }
}

// ============================================================================
// EDIT TYPES
// ============================================================================

/// New counts as entered, before integer validation.
///
/// Fields accept any JSON value so that a missing, `null` or non-text count
/// is rejected as an invalid integer rather than as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EditCountsRequest {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub rse_count: Option<Value>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub dse_count: Option<Value>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub itc_count: Option<Value>,
}

impl EditCountsRequest {
    /// The three counts as text, in `rse, dse, itc` order.
    ///
    /// Strings pass through unchanged, numbers use their JSON form and a
    /// missing value becomes empty text.
    pub fn count_texts(&self) -> [String; 3] {
        [&self.rse_count, &self.dse_count, &self.itc_count].map(count_text)
    }
}

fn count_text(value: &Option<Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A committed edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EditCountsResponse {
    pub id: SiteId,
    pub location: SiteLocation,
    pub counts: CountValues,
    pub total_associates: i64,
    /// Confirmation message for display
    pub message: String,
}

impl From<CommittedEdit> for EditCountsResponse {
    fn from(edit: CommittedEdit) -> Self {
        Self {
            message: edit.message(),
            total_associates: edit.counts.total(),
            id: edit.id,
            location: edit.location,
            counts: edit.counts,
        }
    }
}
