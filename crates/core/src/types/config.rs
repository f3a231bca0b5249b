//! Kiosk configuration document: status, categories and theme.
//!
//! The document is read leniently. Whatever is on disk, [`KioskConfig::from_document`]
//! produces a config with a known status, at least one category and all four
//! theme colors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;
use super::status::KioskStatus;

/// Category used when no valid categories are configured.
pub const DEFAULT_CATEGORY: &str = "Drinks";

/// Storefront colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub accent: String,
    pub background_top: String,
    pub background_bottom: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#6366f1".to_owned(),
            accent: "#0ea5e9".to_owned(),
            background_top: "#f5f8ff".to_owned(),
            background_bottom: "#eef2fb".to_owned(),
        }
    }
}

impl Theme {
    /// Build a theme from a loose JSON object.
    ///
    /// Each color falls back to its default individually when absent,
    /// empty, or not a string.
    #[must_use]
    pub fn from_document(value: Option<&Value>) -> Self {
        let defaults = Self::default();
        let color = |key: &str, fallback: String| {
            value
                .and_then(|v| v.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map_or(fallback, str::to_owned)
        };

        Self {
            primary: color("primary", defaults.primary),
            accent: color("accent", defaults.accent),
            background_top: color("backgroundTop", defaults.background_top),
            background_bottom: color("backgroundBottom", defaults.background_bottom),
        }
    }
}

/// The kiosk configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    pub status: KioskStatus,
    pub categories: Vec<String>,
    pub theme: Theme,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            status: KioskStatus::default(),
            categories: vec![DEFAULT_CATEGORY.to_owned()],
            theme: Theme::default(),
        }
    }
}

impl KioskConfig {
    /// Build a config from a stored document, applying defaults.
    ///
    /// - unknown or missing status reads as `live`
    /// - categories are trimmed and de-duplicated; an empty result reads as the default list
    /// - theme colors default individually
    #[must_use]
    pub fn from_document(doc: &Value) -> Self {
        let status = doc
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let categories = doc
            .get("categories")
            .and_then(Value::as_array)
            .map(|items| normalize_categories(items.iter().filter_map(coerce::text)))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CATEGORY.to_owned()]);

        Self {
            status,
            categories,
            theme: Theme::from_document(doc.get("theme")),
        }
    }

    /// Whether `category` is one of the configured categories.
    #[must_use]
    pub fn lists_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Trim every category, drop blanks, and de-duplicate.
///
/// De-duplication is case-sensitive and keeps the first occurrence, so
/// `["Drinks", "drinks "]` stays two entries.
pub fn normalize_categories<I, S>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for category in categories {
        let trimmed = category.as_ref().trim();
        if !trimmed.is_empty() && !out.iter().any(|c| c == trimmed) {
            out.push(trimmed.to_owned());
        }
    }
    out
}
