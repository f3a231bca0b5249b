//! Cart simulation against live stock.
//!
//! Operations run in order against one session. Each operation clamps to
//! the stock in the snapshot; an operation refused because the kiosk isn't
//! live is reported and the rest still run.
//!
//! # Usage
//!
//! ```bash
//! kiosk shop add:cola add:cola sub:cola add:chips --checkout
//! ```

use std::str::FromStr;

use vending_kiosk_core::{ProductId, QuantityChange, format_amount};

use super::CommandError;
use super::catalog::{load_session, print_cart, print_status};
use crate::client::KioskClient;

/// One cart operation from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOp {
    /// `add:<id>` (+1)
    Add(ProductId),
    /// `sub:<id>` (-1)
    Sub(ProductId),
    /// `drop:<id>` (remove the line)
    Drop(ProductId),
}

impl CartOp {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        match self {
            Self::Add(id) | Self::Sub(id) | Self::Drop(id) => id,
        }
    }

    /// Quantity delta for the cart engine.
    #[must_use]
    pub const fn delta(&self) -> i64 {
        match self {
            Self::Add(_) => 1,
            Self::Sub(_) => -1,
            Self::Drop(_) => i64::MIN,
        }
    }
}

impl FromStr for CartOp {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommandError::InvalidOperation(s.to_owned());
        let (kind, id) = s.split_once(':').ok_or_else(invalid)?;
        if id.is_empty() {
            return Err(invalid());
        }
        let id = ProductId::new(id);
        match kind {
            "add" => Ok(Self::Add(id)),
            "sub" => Ok(Self::Sub(id)),
            "drop" => Ok(Self::Drop(id)),
            _ => Err(invalid()),
        }
    }
}

/// Apply `ops` to a fresh session, print the cart, and optionally check out.
#[allow(clippy::print_stdout)]
pub async fn run(
    client: &KioskClient,
    ops: &[CartOp],
    checkout: bool,
) -> Result<(), CommandError> {
    let mut session = load_session(client).await?;
    print_status(&session.status());

    for op in ops {
        match session.change_quantity(op.id(), op.delta()) {
            Ok(QuantityChange::Unchanged) => {
                println!("{}: unchanged", op.id());
            }
            Ok(change) => tracing::debug!(id = %op.id(), ?change, "cart updated"),
            Err(e) => println!("{}: {e}", op.id()),
        }
    }

    println!();
    print_cart(&session.cart_panel());

    if checkout {
        let receipt = session.checkout()?;
        println!();
        println!("Purchased {} line(s) for {}", receipt.lines.len(), format_amount(receipt.total));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ops() {
        assert_eq!("add:cola".parse::<CartOp>().unwrap(), CartOp::Add(ProductId::new("cola")));
        assert_eq!("sub:prod-001".parse::<CartOp>().unwrap().delta(), -1);
        assert_eq!("drop:x".parse::<CartOp>().unwrap().delta(), i64::MIN);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["cola", "add:", "buy:cola", ""] {
            assert!(matches!(
                bad.parse::<CartOp>(),
                Err(CommandError::InvalidOperation(_))
            ));
        }
    }

    #[test]
    fn test_id_keeps_colons() {
        let op: CartOp = "add:a:b".parse().unwrap();
        assert_eq!(op.id().as_str(), "a:b");
    }
}
