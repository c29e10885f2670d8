//! OpenAPI Specification for the Headcount API
//!
//! Generated with utoipa from the request/response types and the route
//! annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::routes::{health, sites};
use crate::telemetry::metrics;
use crate::types::*;

use headcount_core::{CountValues, SiteLocation};

/// OpenAPI document for the Headcount API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Headcount API",
        version = "0.1.0",
        description = "Filter site headcount records by region, hub, country and site; edit counts; export CSV",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    tags(
        (name = "Sites", description = "Filtering, count edits and CSV export"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        sites::filter_options,
        sites::filter_sites,
        sites::get_site,
        sites::edit_site_counts,
        sites::export_sites,
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(
        schemas(
            ApiError,
            ErrorCode,
            FilterRequest,
            FilterResponse,
            FilterOptionsResponse,
            SiteRow,
            SiteLocation,
            CountValues,
            EditCountsRequest,
            EditCountsResponse,
            HealthResponse,
            HealthStatus,
            HealthDetails,
            ComponentHealth,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Render the document as pretty JSON.
    pub fn to_pretty_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
