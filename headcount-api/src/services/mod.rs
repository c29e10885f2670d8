//! Service Layer
//!
//! Business logic for the site routes. Services take the record store as a
//! `&dyn SiteStore` so handlers and tests can pass any implementation, and
//! keep response types as pure DTOs.

mod edit_service;
mod export_service;
mod filter_service;

pub use edit_service::*;
pub use export_service::*;
pub use filter_service::*;
