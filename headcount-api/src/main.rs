//! Headcount API Server Entry Point
//!
//! Bootstraps telemetry and configuration, prepares the `site_data` table and
//! starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use headcount_api::{
    create_api_router, init_tracing, ApiConfig, ApiError, ApiResult, AppState, DbConfig,
    PgSiteStore, TelemetryConfig,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracing(&telemetry_config)?;

    let db_config = DbConfig::from_env();
    let store = PgSiteStore::from_config(&db_config);
    let api_config = ApiConfig::from_env();

    // A failed bootstrap is not fatal; data routes report their own errors.
    if store.is_configured() {
        match store.initialize(api_config.seed_on_startup).await {
            Ok(seeded) => tracing::info!(seeded, "Database bootstrap complete"),
            Err(e) => tracing::error!(error = %e, "Database bootstrap failed"),
        }
    }

    let state = AppState::new(Arc::new(store), api_config);
    let app: Router = create_api_router(state);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Headcount API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("HEADCOUNT_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("HEADCOUNT_API_PORT").ok())
        .unwrap_or_else(|| "5000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
