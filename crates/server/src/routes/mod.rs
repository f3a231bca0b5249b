//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (both documents readable)
//!
//! # Catalog (public)
//! GET  /api/products           - Product list
//! GET  /api/config             - Config with defaults applied
//!
//! # Admin
//! POST /api/auth               - Check a PIN
//! POST /api/products           - Replace the product list (X-Admin-Pass)
//! POST /api/config             - Replace the config (X-Admin-Pass)
//! POST /api/password           - Change the PIN (X-Admin-Pass)
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(catalog::products).post(admin::save_products),
        )
        .route("/config", get(catalog::config).post(admin::save_config))
        .route("/auth", post(auth::check_pin))
        .route("/password", post(admin::change_pin))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
