//! Public catalog reads.

use axum::{Json, extract::State};
use vending_kiosk_core::{KioskConfig, Product};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /api/products`
#[tracing::instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state
        .products()
        .load()
        .await
        .map_err(AppError::storage("Failed to read products file"))?;
    Ok(Json(products))
}

/// `GET /api/config`
#[tracing::instrument(skip(state))]
pub async fn config(State(state): State<AppState>) -> Result<Json<KioskConfig>> {
    let config = state
        .settings()
        .load()
        .await
        .map_err(AppError::storage("Failed to read config"))?;
    Ok(Json(config))
}
