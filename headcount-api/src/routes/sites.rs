//! Site REST API Routes
//!
//! Filtering, count edits and CSV export over the site record store.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use headcount_core::{SiteFilter, SiteLocation};

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, SiteIdPath},
    services::{apply_filters, edit_counts, export_csv, load_filter_options, ExportOutcome},
    state::{AppState, DynSiteStore},
    types::{
        EditCountsRequest, EditCountsResponse, FilterOptionsResponse, FilterRequest,
        FilterResponse,
    },
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/sites/options - Distinct values for each filter dimension
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/sites/options",
    tag = "Sites",
    responses(
        (status = 200, description = "Filter choices; unavailable dimensions are empty and listed in warnings", body = FilterOptionsResponse),
    ),
))]
pub async fn filter_options(State(store): State<DynSiteStore>) -> Json<FilterOptionsResponse> {
    Json(load_filter_options(store.as_ref()).await.into())
}

/// POST /api/v1/sites/filter - Matching rows and their Total Associates
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/sites/filter",
    tag = "Sites",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Filtered rows with aggregate", body = FilterResponse),
        (status = 500, description = "Query failed", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
))]
pub async fn filter_sites(
    State(store): State<DynSiteStore>,
    ApiJson(req): ApiJson<FilterRequest>,
) -> ApiResult<Json<FilterResponse>> {
    let filter = SiteFilter::from(req);
    let summary = apply_filters(store.as_ref(), &filter).await?;
    Ok(Json(FilterResponse::new(&filter, summary)))
}

/// GET /api/v1/sites/{id} - Location of a record
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/sites/{id}",
    tag = "Sites",
    params(
        ("id" = i32, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record location", body = SiteLocation),
        (status = 400, description = "ID is not an integer", body = ApiError),
        (status = 404, description = "Record not found", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
))]
pub async fn get_site(
    State(store): State<DynSiteStore>,
    SiteIdPath(id): SiteIdPath,
) -> ApiResult<Json<SiteLocation>> {
    store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::entity_not_found("Site record", id))
}

/// POST /api/v1/sites/{id}/counts - Validate and save new counts
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/sites/{id}/counts",
    tag = "Sites",
    params(
        ("id" = i32, Path, description = "Record ID")
    ),
    request_body = EditCountsRequest,
    responses(
        (status = 200, description = "Counts saved", body = EditCountsResponse),
        (status = 400, description = "Invalid ID, or counts that are missing or not integers", body = ApiError),
        (status = 404, description = "Record not found", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
))]
pub async fn edit_site_counts(
    State(store): State<DynSiteStore>,
    State(config): State<ApiConfig>,
    SiteIdPath(id): SiteIdPath,
    ApiJson(req): ApiJson<EditCountsRequest>,
) -> ApiResult<Json<EditCountsResponse>> {
    let [rse, dse, itc] = req.count_texts();
    let edit = edit_counts(store.as_ref(), config.edit_policy, id, &rse, &dse, &itc)
        .await
        .into_result()?;

    Ok(Json(edit.into()))
}

/// POST /api/v1/sites/export - Download the filtered rows as CSV
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/sites/export",
    tag = "Sites",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 404, description = "No rows match the filter", body = ApiError),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
))]
pub async fn export_sites(
    State(store): State<DynSiteStore>,
    ApiJson(req): ApiJson<FilterRequest>,
) -> ApiResult<Response> {
    let filter = SiteFilter::from(req);

    match export_csv(store.as_ref(), &filter).await? {
        ExportOutcome::Csv(export) => {
            let disposition = export.content_disposition();
            Ok((
                [
                    (header::CONTENT_TYPE, export.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.bytes,
            )
                .into_response())
        }
        ExportOutcome::NoData => Err(ApiError::no_data()),
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the site routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/options", get(filter_options))
        .route("/filter", post(filter_sites))
        .route("/export", post(export_sites))
        .route("/:id", get(get_site))
        .route("/:id/counts", post(edit_site_counts))
}
