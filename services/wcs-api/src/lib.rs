//! WCS API service library.
//!
//! Exposes the catalogue loader, handlers and router for the binary and for
//! integration tests.

pub mod catalogue_config;
pub mod handlers;
pub mod loaders;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use state::AppState;

/// Routes served by the WCS API. The Prometheus handle for `/metrics` is
/// layered on by the caller.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/wcs", get(handlers::wcs_handler))
        .route("/wcs/", get(handlers::wcs_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
}
