//! Vending Kiosk Core - Shared types and client-side kiosk logic.
//!
//! This crate provides the types used across all kiosk components:
//! - `server` - File-backed JSON API for the catalog, config and admin PIN
//! - `cli` - Terminal kiosk client and admin editor
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no file access. The cart engine works against whatever product
//! snapshot the caller last fetched.
//!
//! # Modules
//!
//! - [`types`] - Products, prices, kiosk status, config document, PINs
//! - [`cart`] - Cart engine reconciling quantities against snapshot stock
//! - [`catalog`] - Category filter and product card views
//! - [`gate`] - Admin access gate (locked / unlocked)
//! - [`session`] - Owned kiosk session state that the UI renders from

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod gate;
pub mod session;
pub mod types;

pub use cart::{Cart, CartError, CartLine, QuantityChange};
pub use catalog::{CatalogView, CategoryFilter, ProductCard};
pub use gate::{AccessGate, AccessState, GateError};
pub use session::{CartPanelView, KioskSession, Receipt};
pub use types::*;
