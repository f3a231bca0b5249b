//! PIN check for unlocking the admin editor.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    /// Anything but a string is treated as a wrong PIN.
    #[serde(default)]
    pass: Option<Value>,
}

/// `POST /api/auth`
///
/// Stateless: a match only tells the client the PIN is right. Every admin
/// request is checked again on its own.
pub async fn check_pin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AuthRequest>,
) -> Result<Json<Value>> {
    let candidate = body.pass.as_ref().and_then(Value::as_str).unwrap_or_default();

    if state.credential().verify(candidate).await {
        tracing::info!("admin PIN accepted");
        Ok(Json(json!({ "success": true })))
    } else {
        tracing::warn!("admin PIN rejected");
        Err(AppError::InvalidPin)
    }
}
