//! Kiosk session state.
//!
//! A [`KioskSession`] owns everything one storefront screen needs: the last
//! product and config snapshots, the cart, and the active category filter.
//! Views are derived on demand, so whatever a caller renders after a
//! mutation reflects that mutation.

use rust_decimal::Decimal;

use crate::cart::{Cart, CartError, CartLine, QuantityChange};
use crate::catalog::{CatalogView, CategoryFilter, filter_categories};
use crate::types::{KioskConfig, Price, Product, ProductId, StatusView, format_amount};

/// Cart panel message while purchasing is disabled.
pub const UNAVAILABLE_MESSAGE: &str = "Machine unavailable right now";

/// Cart panel message for an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";

/// Owned storefront state for one kiosk screen.
#[derive(Debug, Clone, Default)]
pub struct KioskSession {
    products: Vec<Product>,
    config: KioskConfig,
    cart: Cart,
    filter: CategoryFilter,
}

impl KioskSession {
    /// A session with no snapshot loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install fresh snapshots.
    ///
    /// The cart is reconciled against the new stock and the filter falls
    /// back to `all` if its category is no longer offered. Returns the
    /// number of cart lines that had to be clamped or dropped.
    pub fn apply_snapshot(&mut self, products: Vec<Product>, config: KioskConfig) -> usize {
        self.products = products;
        self.config = config;
        self.filter = std::mem::take(&mut self.filter).resolve(&self.categories());
        self.cart.reconcile(&self.products)
    }

    /// Change the cart quantity of a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Unavailable` when the kiosk status disables
    /// purchasing; the cart is left untouched.
    pub fn change_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        self.ensure_purchasing()?;
        Ok(self.cart.change_quantity(&self.products, id, delta))
    }

    /// Select a category (or `all`).
    pub fn set_filter(&mut self, value: &str) {
        self.filter = CategoryFilter::parse(value).resolve(&self.categories());
    }

    /// Complete the purchase and empty the cart.
    ///
    /// # Errors
    ///
    /// `CartError::Unavailable` unless the kiosk is live, `CartError::Empty`
    /// if there is nothing to buy.
    pub fn checkout(&mut self) -> Result<Receipt, CartError> {
        self.ensure_purchasing()?;
        if self.cart.is_empty() {
            return Err(CartError::Empty);
        }
        let total = self.cart.total();
        Ok(Receipt {
            lines: self.cart.take(),
            total,
        })
    }

    /// The catalog grid.
    #[must_use]
    pub fn catalog(&self) -> CatalogView {
        CatalogView::build(
            &self.products,
            self.categories(),
            &self.filter,
            &self.cart,
            self.purchasing(),
        )
    }

    /// The cart panel.
    #[must_use]
    pub fn cart_panel(&self) -> CartPanelView {
        let purchasing = self.purchasing();
        let message = if !purchasing {
            Some(UNAVAILABLE_MESSAGE)
        } else if self.cart.is_empty() {
            Some(EMPTY_CART_MESSAGE)
        } else {
            None
        };
        let lines = if purchasing {
            self.cart
                .lines()
                .iter()
                .map(CartLineView::from)
                .collect()
        } else {
            Vec::new()
        };

        CartPanelView {
            lines,
            message,
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            checkout_enabled: purchasing && !self.cart.is_empty(),
            checkout_label: if purchasing { "Checkout" } else { "Unavailable" },
        }
    }

    /// Badge, banner and overlay for the current status.
    #[must_use]
    pub fn status(&self) -> StatusView {
        self.config.status.view()
    }

    #[must_use]
    pub const fn config(&self) -> &KioskConfig {
        &self.config
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    fn categories(&self) -> Vec<String> {
        filter_categories(&self.config.categories, &self.products)
    }

    const fn purchasing(&self) -> bool {
        self.config.status.allows_purchasing()
    }

    const fn ensure_purchasing(&self) -> Result<(), CartError> {
        if self.purchasing() {
            Ok(())
        } else {
            Err(CartError::Unavailable(self.config.status))
        }
    }
}

/// One row in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    pub total: Decimal,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.clone(),
            title: line.product.title.clone(),
            price: line.product.price,
            quantity: line.quantity,
            total: line.total(),
        }
    }
}

/// The cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelView {
    /// Empty while purchasing is disabled.
    pub lines: Vec<CartLineView>,
    /// Shown instead of lines.
    pub message: Option<&'static str>,
    pub total: Decimal,
    pub item_count: u32,
    pub checkout_enabled: bool,
    pub checkout_label: &'static str,
}

impl CartPanelView {
    /// `1 item` / `3 items`.
    #[must_use]
    pub fn item_count_label(&self) -> String {
        let plural = if self.item_count == 1 { "" } else { "s" };
        format!("{} item{plural}", self.item_count)
    }

    /// Formatted cart total.
    #[must_use]
    pub fn total_label(&self) -> String {
        format_amount(self.total)
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}
