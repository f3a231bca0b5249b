//! Validation and normalization of admin payloads.
//!
//! Product saves never fail per entry: every field is coerced into shape.
//! Config saves are all-or-nothing and are rejected before anything is
//! written.

use serde_json::Value;
use thiserror::Error;
use vending_kiosk_core::{
    KioskConfig, KioskStatus, Pin, PinError, Product, Theme, normalize_categories,
};

/// Rejected admin payloads. The display text is what the client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid payload")]
    InvalidPayload,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Categories required")]
    CategoriesRequired,
    #[error("{0}")]
    Pin(#[from] PinError),
}

/// Normalize the `products` field of a save request.
///
/// # Errors
///
/// `ValidationError::InvalidPayload` unless `products` is an array.
pub fn products(products: Option<&Value>) -> Result<Vec<Product>, ValidationError> {
    let Some(Value::Array(entries)) = products else {
        return Err(ValidationError::InvalidPayload);
    };

    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Product::from_entry(entry, index))
        .collect())
}

/// Validate a config save.
///
/// # Errors
///
/// `InvalidStatus` when `status` is not one of the three known values,
/// `CategoriesRequired` when nothing is left after trimming and dedupe.
pub fn config(
    status: Option<&Value>,
    categories: Option<&Value>,
    theme: Option<&Value>,
) -> Result<KioskConfig, ValidationError> {
    let status = status
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<KioskStatus>().ok())
        .ok_or(ValidationError::InvalidStatus)?;

    let categories = match categories {
        Some(Value::Array(items)) => {
            normalize_categories(items.iter().filter_map(vending_kiosk_core::coerce::text))
        }
        _ => Vec::new(),
    };
    if categories.is_empty() {
        return Err(ValidationError::CategoriesRequired);
    }

    Ok(KioskConfig {
        status,
        categories,
        theme: Theme::from_document(theme),
    })
}

/// Validate a new admin PIN.
///
/// # Errors
///
/// `ValidationError::Pin` when the value is missing, too short or unsafe to store.
pub fn pin(new_pass: Option<&Value>) -> Result<Pin, ValidationError> {
    let candidate = new_pass.and_then(Value::as_str).unwrap_or_default();
    Ok(Pin::parse(candidate)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use vending_kiosk_core::Price;

    use super::*;

    #[test]
    fn test_products_requires_array() {
        assert_eq!(products(None), Err(ValidationError::InvalidPayload));
        assert_eq!(
            products(Some(&json!({"id": "a"}))),
            Err(ValidationError::InvalidPayload)
        );
        assert!(products(Some(&json!([]))).unwrap().is_empty());
    }

    #[test]
    fn test_products_coerce_bad_numbers() {
        let list = products(Some(&json!([{"price": "abc", "stock": -1}]))).unwrap();
        assert_eq!(list[0].price, Price::ZERO);
        assert_eq!(list[0].stock, -1);
        assert_eq!(list[0].id.as_str(), "prod-001");
        assert_eq!(list[0].title, "Untitled");
        assert_eq!(list[0].category, "Misc");
    }

    #[test]
    fn test_config_rejects_unknown_status() {
        let err = config(Some(&json!("paused")), Some(&json!(["Drinks"])), None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid status");
        assert_eq!(
            config(None, Some(&json!(["Drinks"])), None),
            Err(ValidationError::InvalidStatus)
        );
    }

    #[test]
    fn test_config_dedupes_categories() {
        let saved = config(
            Some(&json!("live")),
            Some(&json!(["", "  ", "Drinks", "drinks "])),
            None,
        )
        .unwrap();
        assert_eq!(saved.categories, vec!["Drinks".to_string(), "drinks".to_string()]);
        assert_eq!(saved.theme, Theme::default());
    }

    #[test]
    fn test_config_requires_categories() {
        for categories in [None, Some(json!([])), Some(json!(["  "])), Some(json!("Drinks"))] {
            assert_eq!(
                config(Some(&json!("maintenance")), categories.as_ref(), None),
                Err(ValidationError::CategoriesRequired)
            );
        }
    }

    #[test]
    fn test_config_merges_partial_theme() {
        let saved = config(
            Some(&json!("out_of_service")),
            Some(&json!(["Snacks"])),
            Some(&json!({"primary": "#000000", "accent": ""})),
        )
        .unwrap();
        assert_eq!(saved.status, KioskStatus::OutOfService);
        assert_eq!(saved.theme.primary, "#000000");
        assert_eq!(saved.theme.accent, Theme::default().accent);
    }

    #[test]
    fn test_pin_validation() {
        assert_eq!(
            pin(Some(&json!("123"))).unwrap_err().to_string(),
            "PIN must be at least 4 digits"
        );
        assert!(pin(None).is_err());
        assert!(pin(Some(&json!(1234))).is_err());
        assert_eq!(pin(Some(&json!("4321"))).unwrap().as_str(), "4321");
    }
}
