//! Health checks.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not touch the data files.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// 503 Service Unavailable if either document can't be read or parsed.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let (products, settings) = tokio::join!(state.products().load(), state.settings().load());

    match (products, settings) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
