//! Category filter and catalog views.

use std::collections::BTreeSet;

use crate::cart::{Cart, stock_left};
use crate::types::{Price, Product, ProductId};

/// Wire value of the "show everything" filter.
pub const ALL_CATEGORIES: &str = "all";

/// Message shown when no product passes the filter.
pub const EMPTY_CATALOG_MESSAGE: &str = "No items to display.";

/// Which products the catalog grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category match.
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter value: the literal `all`, or a category name.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value.to_owned())
        }
    }

    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => &product.category == category,
        }
    }

    /// Fall back to `All` when the category is no longer offered.
    #[must_use]
    pub fn resolve(self, available: &[String]) -> Self {
        match self {
            Self::Category(ref category) if !available.contains(category) => Self::All,
            other => other,
        }
    }

    /// Wire value of the filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }
}

/// Categories offered as filter buttons.
///
/// The configured list wins; without one, the distinct product categories
/// are offered in sorted order.
#[must_use]
pub fn filter_categories(configured: &[String], products: &[Product]) -> Vec<String> {
    if configured.is_empty() {
        products
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        configured.to_vec()
    }
}

/// One product card in the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Price,
    /// Units in this session's cart.
    pub in_cart: u32,
    /// Stock minus cart quantity, never negative.
    pub stock_left: u32,
    /// Whether the decrement button is enabled.
    pub can_decrement: bool,
    /// Whether the increment button is enabled.
    pub can_increment: bool,
}

impl ProductCard {
    /// Stock caption (`3 left` / `Out of stock`).
    #[must_use]
    pub fn stock_label(&self) -> String {
        if self.stock_left > 0 {
            format!("{} left", self.stock_left)
        } else {
            "Out of stock".to_owned()
        }
    }
}

/// The catalog grid plus its filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub categories: Vec<String>,
    pub active: CategoryFilter,
    pub cards: Vec<ProductCard>,
}

impl CatalogView {
    /// Build the grid for `products` under `filter`.
    ///
    /// `purchasing` is false whenever the kiosk status disables the cart;
    /// every quantity button is then disabled.
    #[must_use]
    pub fn build(
        products: &[Product],
        categories: Vec<String>,
        filter: &CategoryFilter,
        cart: &Cart,
        purchasing: bool,
    ) -> Self {
        let cards = products
            .iter()
            .filter(|product| filter.matches(product))
            .map(|product| {
                let in_cart = cart.quantity_of(&product.id);
                let stock_left = stock_left(product.stock, in_cart);
                ProductCard {
                    id: product.id.clone(),
                    title: product.title.clone(),
                    category: product.category.clone(),
                    price: product.price,
                    in_cart,
                    stock_left,
                    can_decrement: purchasing,
                    can_increment: purchasing && stock_left > 0,
                }
            })
            .collect();

        Self {
            categories,
            active: filter.clone(),
            cards,
        }
    }

    /// Message to show instead of the grid, if it is empty.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(EMPTY_CATALOG_MESSAGE)
    }
}
