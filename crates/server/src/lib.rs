//! Vending kiosk server.
//!
//! Serves the product and config documents over a small JSON API and lets a
//! PIN holder rewrite them.
//!
//! # Architecture
//!
//! - Axum web framework, one router ([`app`])
//! - Two JSON documents on disk ([`store`]), rewritten whole on every save
//! - A single shared admin PIN checked on every admin request ([`services::Credential`])
//! - Storefront and cart logic live in `vending-kiosk-core` and run client-side

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use config::ServerConfig;
pub use error::AppError;
pub use state::AppState;

/// Build the application router.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn app(state: AppState) -> Router {
    let mut router = routes::routes()
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        );

    if let Some(dir) = &state.config().static_dir {
        tracing::info!(dir = %dir.display(), "serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.with_state(state)
}
