//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use headcount_storage::SiteStore;

use crate::config::ApiConfig;

/// Record store shared by all handlers.
pub type DynSiteStore = Arc<dyn SiteStore>;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub store: DynSiteStore,
    pub config: ApiConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: DynSiteStore, config: ApiConfig) -> Self {
        Self {
            store,
            config,
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(DynSiteStore, store);
crate::impl_from_ref!(ApiConfig, config);
crate::impl_from_ref!(Instant, start_time);
