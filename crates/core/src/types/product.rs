//! Products as stored in the catalog document.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;
use super::id::ProductId;
use super::price::Price;

/// Title given to products saved without one.
pub const FALLBACK_TITLE: &str = "Untitled";

/// Category given to products saved without one.
pub const FALLBACK_CATEGORY: &str = "Misc";

/// A catalog product.
///
/// `stock` is signed: the catalog stores whatever the admin saved, including
/// negative counts. The cart treats anything below one as sold out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Price,
    pub stock: i64,
}

impl Product {
    /// Coerce a loosely-typed JSON entry into a product.
    ///
    /// `index` is the entry's position in its list and only matters when the
    /// entry has no usable `id`.
    ///
    /// - missing or blank id becomes `prod-<index + 1>` (zero-padded to three digits)
    /// - title and category are trimmed, blanks become `Untitled` / `Misc`
    /// - price and stock that don't parse as numbers become zero; negative
    ///   prices become zero, fractional stock is truncated, negative stock is kept
    #[must_use]
    pub fn from_entry(entry: &Value, index: usize) -> Self {
        let field = |key: &str| entry.get(key).unwrap_or(&Value::Null);

        let id = coerce::trimmed_text(field("id"))
            .map_or_else(|| ProductId::for_position(index), ProductId::from);
        let title = coerce::trimmed_text(field("title")).unwrap_or_else(|| FALLBACK_TITLE.to_owned());
        let category =
            coerce::trimmed_text(field("category")).unwrap_or_else(|| FALLBACK_CATEGORY.to_owned());
        let price = coerce::number(field("price")).map_or(Price::ZERO, Price::new);
        let stock = coerce::number(field("stock"))
            .and_then(|n| n.trunc().to_i64())
            .unwrap_or(0);

        Self {
            id,
            title,
            category,
            price,
            stock,
        }
    }

    /// Whether at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_entry_keeps_valid_fields() {
        let product = Product::from_entry(
            &json!({"id": "cola", "title": " Cola ", "category": "Drinks", "price": 30, "stock": 12}),
            0,
        );
        assert_eq!(product.id.as_str(), "cola");
        assert_eq!(product.title, "Cola");
        assert_eq!(product.category, "Drinks");
        assert_eq!(product.price.amount(), Decimal::new(30, 0));
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_from_entry_synthesizes_id_from_position() {
        let product = Product::from_entry(&json!({"title": "Chips"}), 4);
        assert_eq!(product.id.as_str(), "prod-005");
    }

    #[test]
    fn test_from_entry_defaults_blank_text() {
        let product = Product::from_entry(&json!({"title": "   ", "category": null}), 0);
        assert_eq!(product.title, FALLBACK_TITLE);
        assert_eq!(product.category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_from_entry_unparseable_price_is_zero_and_negative_stock_kept() {
        let product = Product::from_entry(&json!({"price": "abc", "stock": -1}), 0);
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.stock, -1);
    }

    #[test]
    fn test_from_entry_numeric_strings() {
        let product = Product::from_entry(&json!({"price": "12.50", "stock": "3.9"}), 0);
        assert_eq!(product.price.amount(), Decimal::new(1250, 2));
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_from_entry_numeric_id_is_stringified() {
        let product = Product::from_entry(&json!({"id": 17}), 0);
        assert_eq!(product.id.as_str(), "17");
    }

    #[test]
    fn test_in_stock() {
        let mut product = Product::from_entry(&json!({"stock": 1}), 0);
        assert!(product.in_stock());
        product.stock = 0;
        assert!(!product.in_stock());
        product.stock = -4;
        assert!(!product.in_stock());
    }
}
