//! Equality filters over the dimension columns
//!
//! A [`SiteFilter`] holds at most one exact value per [`Dimension`]. Missing
//! dimensions are unconstrained; supplied ones are ANDed together.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SiteRecord;

/// Selection value meaning "no constraint on this dimension".
pub const NO_CONSTRAINT: &str = "All";

/// One of the four dimension columns.
///
/// This is the only way a column name reaches SQL text, so the set of
/// interpolated identifiers is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Region,
    Hub,
    Country,
    Site,
}

impl Dimension {
    /// All dimensions in listing order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Hub,
        Dimension::Country,
        Dimension::Site,
    ];

    /// Column name in `site_data`.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::Hub => "hub",
            Dimension::Country => "country",
            Dimension::Site => "site",
        }
    }

    /// Column heading used in exports.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Hub => "Hub",
            Dimension::Country => "Country",
            Dimension::Site => "Site",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ============================================================================
// SITE FILTER
// ============================================================================

/// Optional exact-match constraint per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SiteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl SiteFilter {
    /// A filter with no constraints; matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder form of [`SiteFilter::set`].
    pub fn with(mut self, dimension: Dimension, selection: impl Into<String>) -> Self {
        self.set(dimension, Some(selection.into()));
        self
    }

    /// Build a filter from four raw selections as submitted by a client.
    pub fn from_selections(
        region: Option<String>,
        hub: Option<String>,
        country: Option<String>,
        site: Option<String>,
    ) -> Self {
        let mut filter = Self::default();
        filter.set(Dimension::Region, region);
        filter.set(Dimension::Hub, hub);
        filter.set(Dimension::Country, country);
        filter.set(Dimension::Site, site);
        filter
    }

    /// Set or clear one dimension.
    ///
    /// `None`, an empty string and [`NO_CONSTRAINT`] all clear it. Any other
    /// value is kept verbatim and compared exactly.
    pub fn set(&mut self, dimension: Dimension, selection: Option<String>) {
        let value = selection.filter(|s| !s.is_empty() && s != NO_CONSTRAINT);
        match dimension {
            Dimension::Region => self.region = value,
            Dimension::Hub => self.hub = value,
            Dimension::Country => self.country = value,
            Dimension::Site => self.site = value,
        }
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Region => self.region.as_deref(),
            Dimension::Hub => self.hub.as_deref(),
            Dimension::Country => self.country.as_deref(),
            Dimension::Site => self.site.as_deref(),
        }
    }

    /// The selection to echo back to a client: the value, or `"All"`.
    pub fn selection(&self, dimension: Dimension) -> &str {
        self.get(dimension).unwrap_or(NO_CONSTRAINT)
    }

    /// Supplied constraints in [`Dimension::ALL`] order.
    pub fn constraints(&self) -> impl Iterator<Item = (Dimension, &str)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|v| (d, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.constraints().next().is_none()
    }

    /// Whether a record satisfies every supplied constraint.
    pub fn matches(&self, record: &SiteRecord) -> bool {
        self.constraints()
            .all(|(dimension, value)| record.dimension(dimension) == value)
    }
}

// ============================================================================
// FILTER SUMMARY
// ============================================================================

/// Result of applying a filter: the matching rows and their Total Associates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FilterSummary {
    pub rows: Vec<SiteRecord>,
    pub total: i64,
}

impl FilterSummary {
    /// Wrap rows and derive the total from exactly those rows.
    pub fn from_rows(rows: Vec<SiteRecord>) -> Self {
        let total = rows.iter().map(SiteRecord::total).sum();
        Self { rows, total }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::{CountValues, SiteLocation};
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("All".to_string()),
            Just(String::new()),
            "[A-Za-z0-9 ]{1,8}",
        ]
    }

    proptest! {
        #[test]
        fn prop_set_keeps_only_real_values(value in arb_value()) {
            let mut filter = SiteFilter::all();
            filter.set(Dimension::Country, Some(value.clone()));
            if value.is_empty() || value == NO_CONSTRAINT {
                prop_assert!(filter.is_empty());
                prop_assert_eq!(filter.selection(Dimension::Country), NO_CONSTRAINT);
            } else {
                prop_assert_eq!(filter.get(Dimension::Country), Some(value.as_str()));
            }
        }

        #[test]
        fn prop_record_matches_its_own_location(
            region in "[A-Z]{2,5}",
            site in "Site [0-9]{1,3}",
            mask in 0u8..16,
        ) {
            let record = SiteRecord::new(
                1,
                SiteLocation::new(region, "Hub", "Country", site),
                CountValues::new(1, 1, 1),
            );
            let mut filter = SiteFilter::all();
            for (bit, dimension) in Dimension::ALL.into_iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    filter.set(dimension, Some(record.dimension(dimension).to_string()));
                }
            }
            prop_assert!(filter.matches(&record));
        }
    }
}
