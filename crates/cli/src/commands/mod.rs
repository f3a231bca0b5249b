//! Subcommand implementations.

pub mod admin;
pub mod catalog;
pub mod shop;

use thiserror::Error;
use vending_kiosk_core::{CartError, GateError, PinError};

use crate::client::ClientError;

/// Errors surfaced by any command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Pin(#[from] PinError),

    #[error("PINs do not match")]
    PinMismatch,

    #[error("Admin PIN required (--pin or KIOSK_ADMIN_PIN)")]
    MissingPin,

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Product file must contain a JSON array of products")]
    InvalidProductFile,

    #[error("Invalid cart operation {0:?}; expected add:<id>, sub:<id> or drop:<id>")]
    InvalidOperation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
