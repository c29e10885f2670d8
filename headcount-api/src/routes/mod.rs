//! REST API Routes Module
//!
//! Includes:
//! - Site routes (filter choices, filtering, count edits, CSV export)
//! - Health check endpoints (Kubernetes-compatible)
//! - Prometheus metrics and the OpenAPI document
//! - CORS support for browser-based clients

pub mod health;
pub mod sites;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware};

pub use health::create_router as health_router;
pub use sites::create_router as sites_router;

// ============================================================================
// OPENAPI
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;

    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// CORS
// ============================================================================

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any).expose_headers(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete application router.
pub fn create_api_router(state: AppState) -> Router {
    let api_routes = Router::new().nest("/sites", sites::create_router());

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health::create_router());

    if state.config.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", get(openapi_json));
    }

    let cors = build_cors_layer(&state.config);

    router
        .layer(from_fn(observability_middleware))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use headcount_core::CountValues;
    use headcount_storage::MockSiteStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(store: &MockSiteStore) -> Router {
        create_api_router(AppState::new(Arc::new(store.clone()), ApiConfig::default()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_filter_options() {
        let store = MockSiteStore::seeded();
        let response = app(&store).oneshot(get_req("/api/v1/sites/options")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["regions"], json!(["AMER", "APAC", "EMEA"]));
        assert_eq!(body["all"], "All");
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn test_filter_options_degrade_when_offline() {
        let store = MockSiteStore::seeded();
        store.set_offline(true);
        let response = app(&store).oneshot(get_req("/api/v1/sites/options")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["regions"], json!([]));
        assert_eq!(body["warnings"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_filter_by_region() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/filter",
                json!({ "region_filter": "AMER", "hub_filter": "All" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["region"], "AMER");
        assert_eq!(body["hub"], "All");
        assert_eq!(body["total_count"], 650);
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["rows"][0]["site"], "Site 6");
        assert_eq!(body["rows"][0]["total_associates"], 50);
    }

    #[tokio::test]
    async fn test_filter_offline_is_service_unavailable() {
        let store = MockSiteStore::seeded();
        store.set_offline(true);
        let response = app(&store)
            .oneshot(post_json("/api/v1/sites/filter", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_get_site() {
        let store = MockSiteStore::seeded();
        let response = app(&store).oneshot(get_req("/api/v1/sites/5")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["region"], "AMER");
        assert_eq!(body["site"], "Site 5");

        let response = app(&store).oneshot(get_req("/api/v1/sites/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_counts_commits() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/1/counts",
                json!({ "rse_count": "55", "dse_count": "60", "itc_count": "40" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total_associates"], 155);
        assert_eq!(
            body["message"],
            "Successfully updated data for APAC - Site 1. New RSE: 55, DSE: 60, ITC: 40."
        );
        assert_eq!(store.get(1).unwrap().counts(), CountValues::new(55, 60, 40));
    }

    #[tokio::test]
    async fn test_edit_counts_invalid_integer() {
        let store = MockSiteStore::seeded();
        let before = store.snapshot();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/2/counts",
                json!({ "rse_count": "10", "dse_count": "20", "itc_count": "abc" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["details"]["reason"], "invalid integer");
        assert_eq!(store.call_count(), 0);
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_edit_counts_missing_or_null_field_is_invalid_integer() {
        let store = MockSiteStore::seeded();
        let before = store.snapshot();

        for body in [
            json!({ "rse_count": "1", "dse_count": "2" }),
            json!({ "rse_count": "1", "dse_count": "2", "itc_count": null }),
            json!({ "rse_count": true, "dse_count": "2", "itc_count": "3" }),
        ] {
            let response = app(&store)
                .oneshot(post_json("/api/v1/sites/1/counts", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let body = body_json(response).await;
            assert_eq!(body["code"], "VALIDATION_FAILED");
            assert_eq!(body["details"]["reason"], "invalid integer");
        }
        assert_eq!(store.call_count(), 0);
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_edit_counts_accepts_json_numbers() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/3/counts",
                json!({ "rse_count": 1, "dse_count": 2, "itc_count": "3" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(3).unwrap().counts(), CountValues::new(1, 2, 3));
    }

    #[tokio::test]
    async fn test_non_integer_id_is_invalid_input() {
        let store = MockSiteStore::seeded();

        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/abc/counts",
                json!({ "rse_count": "1", "dse_count": "2", "itc_count": "3" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"]["reason"], "invalid record id");

        let response = app(&store)
            .oneshot(get_req("/api/v1/sites/99999999999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_INPUT");
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_filter_body_is_invalid_input() {
        let store = MockSiteStore::seeded();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/sites/filter")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"region_filter\":"))
            .unwrap();
        let response = app(&store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_edit_counts_missing_record() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/99/counts",
                json!({ "rse_count": "1", "dse_count": "2", "itc_count": "3" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["details"]["reason"], "record not found");
    }

    #[tokio::test]
    async fn test_export_csv_attachment() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/export",
                json!({ "region_filter": "AMER" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=associate_data_filtered.csv"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with(
            "Region,Hub,Country,Site,RSE Count,DSE Count,ITC Count,Total Associates\r\n"
        ));
        assert_eq!(text.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_export_without_rows_is_no_data() {
        let store = MockSiteStore::seeded();
        let response = app(&store)
            .oneshot(post_json(
                "/api/v1/sites/export",
                json!({ "region_filter": "EMEA", "country_filter": "Japan" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NO_DATA");
        assert_eq!(
            body["message"],
            "No data found matching the current filters for download."
        );
    }

    #[tokio::test]
    async fn test_health_ready_reflects_store() {
        let store = MockSiteStore::seeded();
        let response = app(&store).oneshot(get_req("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        store.set_offline(true);
        let response = app(&store).oneshot(get_req("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "unhealthy");

        let response = app(&store).oneshot(get_req("/health/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_route_toggle() {
        let store = MockSiteStore::seeded();
        let response = app(&store).oneshot(get_req("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let config = ApiConfig {
            metrics_enabled: false,
            ..ApiConfig::default()
        };
        let router = create_api_router(AppState::new(Arc::new(store), config));
        let response = router.oneshot(get_req("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[cfg(feature = "openapi")]
    #[tokio::test]
    async fn test_openapi_document_lists_site_routes() {
        let store = MockSiteStore::seeded();
        let response = app(&store).oneshot(get_req("/openapi.json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["paths"].get("/api/v1/sites/filter").is_some());
        assert!(body["paths"].get("/api/v1/sites/{id}/counts").is_some());
    }
}
