//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors reach the client as
//! `{"error": "<message>"}`; storage failures are captured to Sentry and
//! answered with a fixed message that names the action, never the path.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::ValidationError;
use crate::store::StoreError;

/// Application-level error type for the kiosk API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing a backing document failed.
    #[error("{action}: {source}")]
    Storage {
        /// Client-facing message, e.g. "Failed to save products".
        action: &'static str,
        #[source]
        source: StoreError,
    },

    /// Missing or mismatched admin PIN.
    #[error("Unauthorized")]
    Unauthorized,

    /// The PIN check endpoint rejected the submission.
    #[error("Invalid PIN")]
    InvalidPin,

    /// Payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a store error with the message the client should see.
    pub fn storage(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { action, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::Validation(ValidationError::InvalidPayload)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage { .. } | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Storage { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized | Self::InvalidPin => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Storage { action, .. } => (*action).to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use axum::body::to_bytes;
    use vending_kiosk_core::PinError;

    use super::*;

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let source = StoreError::Write {
            path: "/secret/products.json".into(),
            source: io::Error::other("disk full"),
        };
        let (status, body) = body_of(AppError::storage("Failed to save products")(source)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to save products"}));
    }

    #[tokio::test]
    async fn test_validation_messages() {
        let (status, body) = body_of(ValidationError::InvalidStatus.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid status"}));

        let (_, body) = body_of(ValidationError::Pin(PinError::TooShort).into()).await;
        assert_eq!(body, json!({"error": "PIN must be at least 4 digits"}));
    }

    #[tokio::test]
    async fn test_auth_errors() {
        let (status, body) = body_of(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Unauthorized"}));

        let (status, body) = body_of(AppError::InvalidPin).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid PIN"}));
    }
}
