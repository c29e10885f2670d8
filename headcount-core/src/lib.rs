//! Headcount Core - Site Record Types
//!
//! Pure data structures shared by every other crate: site records, the
//! dimension/count vocabulary, equality filters, the error taxonomy, the
//! fixed seed dataset and CSV rendering. Nothing in here performs I/O.

pub mod error;
pub mod export;
pub mod filter;
pub mod seed;

use serde::{Deserialize, Serialize};

pub use error::{StoreError, StoreResult, ValidationError};
pub use export::{
    render_csv, CsvExport, CSV_CONTENT_TYPE, CSV_FILENAME, CSV_HEADERS,
};
pub use filter::{Dimension, FilterSummary, SiteFilter, NO_CONSTRAINT};
pub use seed::{seed_sites, SeedSite, SEED_SITES};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Server-assigned record identifier (`SERIAL` in PostgreSQL).
pub type SiteId = i32;

/// A single headcount column value (`INT` in PostgreSQL).
pub type Count = i32;

// ============================================================================
// LOCATION
// ============================================================================

/// The four dimension columns that identify a site.
///
/// These never change once a record exists; only the counts are editable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SiteLocation {
    pub region: String,
    pub hub: String,
    pub country: String,
    pub site: String,
}

impl SiteLocation {
    pub fn new(
        region: impl Into<String>,
        hub: impl Into<String>,
        country: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            hub: hub.into(),
            country: country.into(),
            site: site.into(),
        }
    }

    /// Short human-readable label, e.g. `AMER - Site 5`.
    pub fn describe(&self) -> String {
        format!("{} - {}", self.region, self.site)
    }
}

// ============================================================================
// COUNTS
// ============================================================================

/// The three editable count columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CountValues {
    pub rse_count: Count,
    pub dse_count: Count,
    pub itc_count: Count,
}

impl CountValues {
    pub fn new(rse_count: Count, dse_count: Count, itc_count: Count) -> Self {
        Self {
            rse_count,
            dse_count,
            itc_count,
        }
    }

    /// Parse the three counts from their textual form.
    ///
    /// Surrounding whitespace is ignored. The first field that fails to parse
    /// is reported.
    pub fn parse(rse: &str, dse: &str, itc: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            rse_count: parse_count("rse_count", rse)?,
            dse_count: parse_count("dse_count", dse)?,
            itc_count: parse_count("itc_count", itc)?,
        })
    }

    /// Reject any negative count.
    pub fn ensure_non_negative(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if value < 0 {
                return Err(ValidationError::NegativeCount {
                    field: field.to_string(),
                    value: i64::from(value),
                });
            }
        }
        Ok(())
    }

    /// Total Associates: the sum of the three counts.
    ///
    /// Computed in `i64` so three `i32::MAX` values cannot overflow.
    pub fn total(&self) -> i64 {
        i64::from(self.rse_count) + i64::from(self.dse_count) + i64::from(self.itc_count)
    }

    fn fields(&self) -> [(&'static str, Count); 3] {
        [
            ("rse_count", self.rse_count),
            ("dse_count", self.dse_count),
            ("itc_count", self.itc_count),
        ]
    }
}

fn parse_count(field: &str, raw: &str) -> Result<Count, ValidationError> {
    raw.trim()
        .parse::<Count>()
        .map_err(|_| ValidationError::InvalidInteger {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

// ============================================================================
// SITE RECORD
// ============================================================================

/// One row of the `site_data` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SiteRecord {
    pub id: SiteId,
    pub region: String,
    pub hub: String,
    pub country: String,
    pub site: String,
    pub rse_count: Count,
    pub dse_count: Count,
    pub itc_count: Count,
}

impl SiteRecord {
    pub fn new(id: SiteId, location: SiteLocation, counts: CountValues) -> Self {
        Self {
            id,
            region: location.region,
            hub: location.hub,
            country: location.country,
            site: location.site,
            rse_count: counts.rse_count,
            dse_count: counts.dse_count,
            itc_count: counts.itc_count,
        }
    }

    pub fn location(&self) -> SiteLocation {
        SiteLocation::new(&self.region, &self.hub, &self.country, &self.site)
    }

    pub fn counts(&self) -> CountValues {
        CountValues::new(self.rse_count, self.dse_count, self.itc_count)
    }

    /// Value of one dimension column.
    pub fn dimension(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Hub => &self.hub,
            Dimension::Country => &self.country,
            Dimension::Site => &self.site,
        }
    }

    /// Overwrite the three counts, leaving the identity columns untouched.
    pub fn set_counts(&mut self, counts: CountValues) {
        self.rse_count = counts.rse_count;
        self.dse_count = counts.dse_count;
        self.itc_count = counts.itc_count;
    }

    /// Total Associates for this record.
    pub fn total(&self) -> i64 {
        self.counts().total()
    }

    /// Listing order: (region, hub, country, site).
    pub fn sort_key(&self) -> (&str, &str, &str, &str) {
        (&self.region, &self.hub, &self.country, &self.site)
    }
}

// ============================================================================
// TESTS
// ============================================================================
