//! Sample dataset loaded into an empty `site_data` table on first startup.

use crate::{Count, CountValues, SiteLocation};

/// One seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSite {
    pub region: &'static str,
    pub hub: &'static str,
    pub country: &'static str,
    pub site: &'static str,
    pub rse_count: Count,
    pub dse_count: Count,
    pub itc_count: Count,
}

impl SeedSite {
    const fn new(
        region: &'static str,
        hub: &'static str,
        country: &'static str,
        site: &'static str,
        rse_count: Count,
        dse_count: Count,
        itc_count: Count,
    ) -> Self {
        Self {
            region,
            hub,
            country,
            site,
            rse_count,
            dse_count,
            itc_count,
        }
    }

    pub fn location(&self) -> SiteLocation {
        SiteLocation::new(self.region, self.hub, self.country, self.site)
    }

    pub fn counts(&self) -> CountValues {
        CountValues::new(self.rse_count, self.dse_count, self.itc_count)
    }
}

/// Rows are inserted in this order, so ids 1..=8 map to Site 1..=Site 8.
pub const SEED_SITES: [SeedSite; 8] = [
    SeedSite::new("APAC", "Hub A", "India", "Site 1", 50, 60, 40),
    SeedSite::new("APAC", "Hub A", "India", "Site 2", 100, 50, 50),
    SeedSite::new("EMEA", "Hub B", "Germany", "Site 3", 30, 40, 30),
    SeedSite::new("EMEA", "Hub B", "UK", "Site 4", 150, 100, 50),
    SeedSite::new("AMER", "Hub C", "USA", "Site 5", 200, 150, 100),
    SeedSite::new("AMER", "Hub C", "Canada", "Site 6", 10, 20, 20),
    SeedSite::new("APAC", "Hub D", "Japan", "Site 7", 60, 30, 30),
    SeedSite::new("AMER", "Hub C", "USA", "Site 8", 50, 50, 50),
];

/// Seed rows as (location, counts) pairs, in insertion order.
pub fn seed_sites() -> Vec<(SiteLocation, CountValues)> {
    SEED_SITES
        .iter()
        .map(|s| (s.location(), s.counts()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_eight_rows() {
        assert_eq!(seed_sites().len(), 8);
    }

    #[test]
    fn test_seed_amer_totals() {
        let totals: Vec<(&str, i64)> = SEED_SITES
            .iter()
            .filter(|s| s.region == "AMER")
            .map(|s| (s.site, s.counts().total()))
            .collect();
        assert_eq!(totals, vec![("Site 5", 450), ("Site 6", 50), ("Site 8", 150)]);
    }

    #[test]
    fn test_seed_counts_are_non_negative() {
        for s in SEED_SITES {
            assert!(s.counts().ensure_non_negative().is_ok());
        }
    }
}
