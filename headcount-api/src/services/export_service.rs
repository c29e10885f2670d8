//! Export Service
//!
//! CSV export of the same rows the filter view shows.

use headcount_core::{CsvExport, SiteFilter, StoreResult};
use headcount_storage::SiteStore;

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Csv(CsvExport),
    /// The filter matched nothing; no file is produced.
    NoData,
}

/// Run `filter` and render the matching rows as CSV.
pub async fn export_csv(store: &dyn SiteStore, filter: &SiteFilter) -> StoreResult<ExportOutcome> {
    let rows = store.query(filter).await?;
    if rows.is_empty() {
        tracing::info!("Export requested for a filter with no matching rows");
        return Ok(ExportOutcome::NoData);
    }

    let export = CsvExport::from_records(&rows);
    tracing::info!(rows = export.row_count, bytes = export.bytes.len(), "Rendered CSV export");
    Ok(ExportOutcome::Csv(export))
}
