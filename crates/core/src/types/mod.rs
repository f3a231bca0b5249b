//! Core types for the vending kiosk.
//!
//! This module provides type-safe wrappers for the kiosk's domain concepts.

pub mod coerce;
pub mod config;
pub mod credential;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use config::{DEFAULT_CATEGORY, KioskConfig, Theme, normalize_categories};
pub use credential::{MIN_PIN_LENGTH, Pin, PinError, constant_time_eq};
pub use id::ProductId;
pub use price::{Price, format_amount};
pub use product::{FALLBACK_CATEGORY, FALLBACK_TITLE, Product};
pub use status::{KioskStatus, OverlayView, StatusMeta, StatusView, UnknownStatus};
