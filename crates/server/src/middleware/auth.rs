//! Admin authentication extractor.
//!
//! There are no sessions: every admin request carries the PIN in the
//! `X-Admin-Pass` header and it is checked against the live credential.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin PIN.
pub const ADMIN_PASS_HEADER: &str = "x-admin-pass";

/// Extractor that requires the admin PIN.
///
/// Put it before any body extractor so unauthenticated requests are
/// rejected without parsing the payload.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "ok"
/// }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(ADMIN_PASS_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        if state.credential().verify(supplied).await {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "admin request rejected");
            Err(AppError::Unauthorized)
        }
    }
}
