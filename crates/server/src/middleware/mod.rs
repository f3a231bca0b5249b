//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)

pub mod auth;
pub mod json;
pub mod request_id;

pub use auth::{ADMIN_PASS_HEADER, RequireAdmin};
pub use json::ApiJson;
pub use request_id::request_id_middleware;
