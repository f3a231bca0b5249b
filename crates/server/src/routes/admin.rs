//! PIN-gated admin writes.
//!
//! Each handler takes [`RequireAdmin`] before the body, so a request with a
//! bad PIN is answered 401 without looking at the payload.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::{ApiJson, RequireAdmin};
use crate::services::sanitize;
use crate::state::AppState;

/// `POST /api/products`
///
/// Replaces the whole list. Entries are coerced, never rejected.
pub async fn save_products(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>> {
    let products = sanitize::products(body.get("products"))?;

    state
        .products()
        .replace(&products)
        .await
        .map_err(AppError::storage("Failed to save products"))?;

    Ok(Json(json!({ "success": true })))
}

/// `POST /api/config`
pub async fn save_config(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>> {
    let config = sanitize::config(
        body.get("status"),
        body.get("categories"),
        body.get("theme"),
    )?;

    state
        .settings()
        .replace(&config)
        .await
        .map_err(AppError::storage("Failed to save config"))?;

    Ok(Json(json!({ "success": true, "config": config })))
}

/// `POST /api/password`
///
/// Succeeds once the in-memory PIN is swapped, even if writing it to the
/// environment file fails.
pub async fn change_pin(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>> {
    let pin = sanitize::pin(body.get("newPass"))?;
    state.credential().replace(pin).await;
    Ok(Json(json!({ "success": true })))
}
