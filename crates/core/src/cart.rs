//! Client-side cart engine.
//!
//! The cart never talks to the server. It holds copies of products taken at
//! add-time and reconciles every quantity change against the stock in the
//! caller's latest product snapshot:
//!
//! - a line's quantity is always in `1..=stock`
//! - the first add of a product yields quantity 1, whatever the delta
//! - a change that lands on zero removes the line
//! - out-of-range changes are clamped, never rejected

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{KioskStatus, Product, ProductId};

/// Errors surfaced by cart entry points that the kiosk status can disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// Purchasing is disabled by the current kiosk status.
    #[error("purchasing is disabled while the kiosk is {0}")]
    Unavailable(KioskStatus),
    /// Checkout attempted with nothing in the cart.
    #[error("cart is empty")]
    Empty,
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product as it was when first added.
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// A new line was created with quantity 1.
    Added,
    /// An existing line now has this quantity.
    Updated(u32),
    /// The line was removed.
    Removed,
    /// Nothing changed (unknown product, no stock, or already at the limit).
    Unchanged,
}

/// The cart: an ordered list of lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `delta` to the quantity of `id`, clamped against `snapshot` stock.
    pub fn change_quantity(
        &mut self,
        snapshot: &[Product],
        id: &ProductId,
        delta: i64,
    ) -> QuantityChange {
        let Some(product) = snapshot.iter().find(|p| &p.id == id) else {
            return QuantityChange::Unchanged;
        };
        let cap = stock_cap(product.stock);

        let Some(index) = self.position(id) else {
            if delta > 0 && cap > 0 {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                });
                return QuantityChange::Added;
            }
            return QuantityChange::Unchanged;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::Unchanged;
        };
        let old = line.quantity;
        let wanted = i64::from(old).saturating_add(delta).clamp(0, i64::from(cap));
        let new = u32::try_from(wanted).unwrap_or(0);

        if new == 0 {
            self.lines.remove(index);
            QuantityChange::Removed
        } else if new == old {
            QuantityChange::Unchanged
        } else {
            line.quantity = new;
            QuantityChange::Updated(new)
        }
    }

    /// Re-check every line against a fresh snapshot.
    ///
    /// Lines whose product is gone or sold out are dropped; the rest are
    /// clamped to the new stock. Returns the number of lines touched.
    pub fn reconcile(&mut self, snapshot: &[Product]) -> usize {
        let before = self.lines.clone();
        self.lines.retain_mut(|line| {
            let cap = snapshot
                .iter()
                .find(|p| p.id == line.product.id)
                .map_or(0, |p| stock_cap(p.stock));
            line.quantity = line.quantity.min(cap);
            line.quantity > 0
        });

        let kept_changed = self
            .lines
            .iter()
            .filter(|line| {
                before
                    .iter()
                    .any(|old| old.product.id == line.product.id && old.quantity != line.quantity)
            })
            .count();
        (before.len() - self.lines.len()) + kept_changed
    }

    /// Quantity of `id` in the cart (zero if absent).
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.product.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Cart lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of line totals, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.total()))
    }

    /// Remove and return every line.
    pub fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.product.id == id)
    }
}

/// Units of a product that may be in a cart: `stock`, floored at zero.
#[must_use]
pub fn stock_cap(stock: i64) -> u32 {
    u32::try_from(stock.max(0)).unwrap_or(u32::MAX)
}

/// Units still available once `in_cart` are reserved; never negative.
#[must_use]
pub fn stock_left(stock: i64, in_cart: u32) -> u32 {
    stock_cap(stock).saturating_sub(in_cart)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn product(id: &str, stock: i64, price: i64) -> Product {
        Product::from_entry(
            &json!({"id": id, "title": id, "category": "Drinks", "price": price, "stock": stock}),
            0,
        )
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let snapshot = vec![
            Product::from_entry(
                &json!({"id": "gold", "price": "79228162514264337593543950335", "stock": 5}),
                0,
            ),
            product("cola", 5, 30),
        ];
        let mut cart = Cart::new();
        cart.change_quantity(&snapshot, &id("gold"), 1);
        cart.change_quantity(&snapshot, &id("gold"), 1);
        cart.change_quantity(&snapshot, &id("cola"), 1);

        assert_eq!(cart.quantity_of(&id("gold")), 2);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_first_add_is_always_one() {
        let snapshot = vec![product("cola", 10, 30)];
        let mut cart = Cart::new();

        assert_eq!(cart.change_quantity(&snapshot, &id("cola"), 5), QuantityChange::Added);
        assert_eq!(cart.quantity_of(&id("cola")), 1);
    }

    #[test]
    fn test_unknown_product_is_silent_noop() {
        let snapshot = vec![product("cola", 10, 30)];
        let mut cart = Cart::new();

        assert_eq!(
            cart.change_quantity(&snapshot, &id("ghost"), 1),
            QuantityChange::Unchanged
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_delta_without_line_does_nothing() {
        let snapshot = vec![product("cola", 10, 30)];
        let mut cart = Cart::new();

        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), -1),
            QuantityChange::Unchanged
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_sold_out_product_cannot_be_added() {
        let snapshot = vec![product("cola", 0, 30), product("chips", -2, 20)];
        let mut cart = Cart::new();

        cart.change_quantity(&snapshot, &id("cola"), 1);
        cart.change_quantity(&snapshot, &id("chips"), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_clamps_to_stock() {
        let snapshot = vec![product("cola", 2, 30)];
        let mut cart = Cart::new();

        cart.change_quantity(&snapshot, &id("cola"), 1);
        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), 1),
            QuantityChange::Updated(2)
        );
        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), 1),
            QuantityChange::Unchanged
        );
        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), 50),
            QuantityChange::Unchanged
        );
        assert_eq!(cart.quantity_of(&id("cola")), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_and_readd_starts_at_one() {
        let snapshot = vec![product("cola", 5, 30)];
        let mut cart = Cart::new();

        cart.change_quantity(&snapshot, &id("cola"), 1);
        cart.change_quantity(&snapshot, &id("cola"), 1);
        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), -5),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());

        cart.change_quantity(&snapshot, &id("cola"), 3);
        assert_eq!(cart.quantity_of(&id("cola")), 1);
    }

    #[test]
    fn test_extreme_deltas_do_not_overflow() {
        let snapshot = vec![product("cola", 3, 30)];
        let mut cart = Cart::new();

        cart.change_quantity(&snapshot, &id("cola"), 1);
        cart.change_quantity(&snapshot, &id("cola"), i64::MAX);
        assert_eq!(cart.quantity_of(&id("cola")), 3);
        assert_eq!(
            cart.change_quantity(&snapshot, &id("cola"), i64::MIN),
            QuantityChange::Removed
        );
    }

    #[test]
    fn test_quantity_never_exceeds_stock_over_random_walk() {
        let snapshot = vec![product("a", 3, 10), product("b", 1, 5), product("c", 0, 1)];
        let ids = ["a", "b", "c", "missing"];
        let deltas = [1, -1, 2, 5, -3, 1, 1, -10, 4, 1];
        let mut cart = Cart::new();

        for step in 0..200_usize {
            let target = id(ids[step % ids.len()]);
            let delta = deltas[(step * 7) % deltas.len()];
            cart.change_quantity(&snapshot, &target, delta);

            for line in cart.lines() {
                let stock = snapshot
                    .iter()
                    .find(|p| p.id == line.product.id)
                    .map_or(0, |p| p.stock);
                assert!(line.quantity >= 1);
                assert!(i64::from(line.quantity) <= stock);
            }
        }
    }

    #[test]
    fn test_reconcile_clamps_and_drops() {
        let before = vec![product("a", 5, 10), product("b", 5, 10), product("c", 5, 10)];
        let mut cart = Cart::new();
        for target in ["a", "b", "c"] {
            cart.change_quantity(&before, &id(target), 1);
            cart.change_quantity(&before, &id(target), 3);
        }

        // a keeps enough stock, b drops to 2, c disappears
        let after = vec![product("a", 9, 10), product("b", 2, 10)];
        let touched = cart.reconcile(&after);

        assert_eq!(touched, 2);
        assert_eq!(cart.quantity_of(&id("a")), 4);
        assert_eq!(cart.quantity_of(&id("b")), 2);
        assert_eq!(cart.quantity_of(&id("c")), 0);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_reconcile_drops_sold_out() {
        let before = vec![product("a", 5, 10)];
        let mut cart = Cart::new();
        cart.change_quantity(&before, &id("a"), 1);

        cart.reconcile(&[product("a", 0, 10)]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let snapshot = vec![product("cola", 5, 30), product("chips", 5, 20)];
        let mut cart = Cart::new();
        cart.change_quantity(&snapshot, &id("cola"), 1);
        cart.change_quantity(&snapshot, &id("cola"), 1);
        cart.change_quantity(&snapshot, &id("chips"), 1);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Decimal::new(80, 0));
    }

    #[test]
    fn test_stock_left_never_negative() {
        assert_eq!(stock_left(5, 2), 3);
        assert_eq!(stock_left(2, 5), 0);
        assert_eq!(stock_left(-3, 0), 0);
    }

    #[test]
    fn test_take_empties_cart() {
        let snapshot = vec![product("cola", 5, 30)];
        let mut cart = Cart::new();
        cart.change_quantity(&snapshot, &id("cola"), 1);

        let lines = cart.take();
        assert_eq!(lines.len(), 1);
        assert!(cart.is_empty());
    }
}
