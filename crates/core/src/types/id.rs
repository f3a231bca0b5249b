//! Product identifiers.
//!
//! Product IDs are opaque strings. The admin editor hands out
//! `prod-<unix millis>` IDs for new rows, and the server synthesizes
//! `prod-<position>` for entries that arrive without one.

use serde::{Deserialize, Serialize};

/// Prefix shared by every generated product ID.
pub const PRODUCT_ID_PREFIX: &str = "prod-";

/// Opaque, unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// ID for the entry at zero-based `index` in a saved list (`prod-001`, `prod-002`, ...).
    #[must_use]
    pub fn for_position(index: usize) -> Self {
        Self(format!("{PRODUCT_ID_PREFIX}{:03}", index.saturating_add(1)))
    }

    /// ID for a row created at `millis` since the Unix epoch.
    #[must_use]
    pub fn from_timestamp(millis: i64) -> Self {
        Self(format!("{PRODUCT_ID_PREFIX}{millis}"))
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_position_is_one_based_and_padded() {
        assert_eq!(ProductId::for_position(0).as_str(), "prod-001");
        assert_eq!(ProductId::for_position(41).as_str(), "prod-042");
        assert_eq!(ProductId::for_position(1233).as_str(), "prod-1234");
    }

    #[test]
    fn test_from_timestamp() {
        assert_eq!(
            ProductId::from_timestamp(1_700_000_000_123).as_str(),
            "prod-1700000000123"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::new("cola-330");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cola-330\"");
    }
}
