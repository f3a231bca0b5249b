//! JSON body extractor whose rejections use the API error shape.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json`, but a malformed or missing body answers
/// `400 {"error": "Invalid payload"}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
