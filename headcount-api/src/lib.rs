//! Headcount API - REST Layer
//!
//! Axum service over the `site_data` table: filter choices, filtered listings
//! with a Total Associates aggregate, validated count edits and CSV export.
//! Records live in PostgreSQL behind a deadpool connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod macros;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, EditPolicy};
pub use db::{DbConfig, PgSiteStore};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::{
    apply_filters, edit_counts, export_csv, load_filter_options, CommittedEdit, EditOutcome,
    EditRejection, EditState, ExportOutcome, FilterOptions,
};
pub use state::{AppState, DynSiteStore};
pub use telemetry::{init_tracing, TelemetryConfig};
pub use types::*;
