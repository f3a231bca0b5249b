//! Admin editor commands.
//!
//! Every command first unlocks an [`AccessGate`] with the PIN given on the
//! command line. The server checks the PIN again on every write, so the
//! gate only saves a round of failing requests.
//!
//! # Usage
//!
//! ```bash
//! kiosk --pin 000111 admin login
//! kiosk --pin 000111 admin products list
//! kiosk --pin 000111 admin products add --title Cola --category Drinks --price 30 --stock 12
//! kiosk --pin 000111 admin products edit prod-001 --stock 0
//! kiosk --pin 000111 admin products remove prod-001
//! kiosk --pin 000111 admin products pull products.json
//! kiosk --pin 000111 admin products push products.json
//! kiosk --pin 000111 admin config set --status maintenance --category Drinks --category Snacks
//! kiosk --pin 000111 admin pin 4321 4321
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use vending_kiosk_core::{
    AccessGate, FALLBACK_CATEGORY, KioskConfig, Pin, Price, Product, ProductId, Theme,
};

use super::CommandError;
use crate::client::KioskClient;

/// Title given to rows created with `products add`.
pub const NEW_PRODUCT_TITLE: &str = "New Product";

/// Field overrides for `products add` / `products edit`.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
}

impl ProductFields {
    fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = Price::new(price);
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Overrides for `config set`. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigChanges {
    pub status: Option<String>,
    pub categories: Vec<String>,
    pub primary: Option<String>,
    pub accent: Option<String>,
    pub background_top: Option<String>,
    pub background_bottom: Option<String>,
}

impl ConfigChanges {
    /// Merge into `current`, producing the status, categories and theme to send.
    fn merge(self, current: &KioskConfig) -> (String, Vec<String>, Theme) {
        let status = self
            .status
            .unwrap_or_else(|| current.status.as_str().to_owned());
        let categories = if self.categories.is_empty() {
            current.categories.clone()
        } else {
            self.categories
        };
        let mut theme = current.theme.clone();
        for (slot, value) in [
            (&mut theme.primary, self.primary),
            (&mut theme.accent, self.accent),
            (&mut theme.background_top, self.background_top),
            (&mut theme.background_bottom, self.background_bottom),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        (status, categories, theme)
    }
}

/// An unlocked admin connection.
pub struct Admin<'a> {
    client: &'a KioskClient,
    gate: AccessGate,
}

impl<'a> Admin<'a> {
    /// Check `pin` with the server and unlock the gate.
    ///
    /// # Errors
    ///
    /// `CommandError::MissingPin` without a PIN, `CommandError::Gate` when
    /// the server rejects it.
    pub async fn unlock(client: &'a KioskClient, pin: Option<&str>) -> Result<Self, CommandError> {
        let pin = pin.ok_or(CommandError::MissingPin)?;
        let accepted = !pin.is_empty() && client.check_pin(pin).await?;

        let mut gate = AccessGate::new();
        gate.submit(pin, accepted)?;
        tracing::debug!(state = ?gate.state(), "admin gate");
        Ok(Self { client, gate })
    }

    fn credential(&self) -> Result<SecretString, CommandError> {
        self.gate
            .credential()
            .map(SecretString::from)
            .ok_or(CommandError::MissingPin)
    }

    async fn replace_products(&self, products: &[Product]) -> Result<(), CommandError> {
        self.client
            .save_products(&self.credential()?, products)
            .await?;
        Ok(())
    }

    #[allow(clippy::print_stdout)]
    pub fn login(&self) {
        println!("Unlocked");
    }

    /// Print the product list with IDs.
    #[allow(clippy::print_stdout)]
    pub async fn list_products(&self) -> Result<(), CommandError> {
        let products = self.client.products().await?;
        if products.is_empty() {
            println!("No products");
        }
        for product in &products {
            println!(
                "{:<20} {:<24} {:<10} {:>10} {:>6}",
                product.id.as_str(),
                product.title,
                product.category,
                product.price.display(),
                product.stock,
            );
        }
        Ok(())
    }

    /// Append a new row and save the list.
    #[allow(clippy::print_stdout)]
    pub async fn add_product(&self, fields: ProductFields) -> Result<(), CommandError> {
        let mut products = self.client.products().await?;
        let product = new_product(chrono::Utc::now().timestamp_millis(), fields);
        let id = product.id.clone();
        products.push(product);
        self.replace_products(&products).await?;
        println!("Added {id}");
        Ok(())
    }

    /// Change fields of one row in place and save the list.
    pub async fn edit_product(&self, id: &str, fields: ProductFields) -> Result<(), CommandError> {
        let mut products = self.client.products().await?;
        let product = products
            .iter_mut()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| CommandError::UnknownProduct(id.to_owned()))?;
        fields.apply(product);
        self.replace_products(&products).await
    }

    /// Delete one row and save the list.
    #[allow(clippy::print_stdout)]
    pub async fn remove_product(&self, id: &str) -> Result<(), CommandError> {
        let mut products = self.client.products().await?;
        let before = products.len();
        products.retain(|p| p.id.as_str() != id);
        if products.len() == before {
            return Err(CommandError::UnknownProduct(id.to_owned()));
        }
        self.replace_products(&products).await?;
        println!("Removed {id}");
        Ok(())
    }

    /// Write the current list to `path` as JSON.
    #[allow(clippy::print_stdout)]
    pub async fn pull_products(&self, path: &Path) -> Result<(), CommandError> {
        let products = self.client.products().await?;
        let mut body = serde_json::to_vec_pretty(&products)?;
        body.push(b'\n');
        tokio::fs::write(path, body).await?;
        println!("Wrote {} products to {}", products.len(), path.display());
        Ok(())
    }

    /// Replace the list with the JSON array in `path`.
    #[allow(clippy::print_stdout)]
    pub async fn push_products(&self, path: &Path) -> Result<(), CommandError> {
        let raw = tokio::fs::read(path).await?;
        let products = products_from_file(&serde_json::from_slice(&raw)?)?;
        self.replace_products(&products).await?;
        println!("Saved {} products", products.len());
        Ok(())
    }

    #[allow(clippy::print_stdout)]
    pub async fn show_config(&self) -> Result<(), CommandError> {
        let config = self.client.config().await?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        Ok(())
    }

    /// Merge `changes` into the current config and save it.
    #[allow(clippy::print_stdout)]
    pub async fn set_config(&self, changes: ConfigChanges) -> Result<(), CommandError> {
        let current = self.client.config().await?;
        let (status, categories, theme) = changes.merge(&current);
        let saved = self
            .client
            .save_config(&self.credential()?, &status, &categories, &theme)
            .await?;
        println!("{}", serde_json::to_string_pretty(&saved)?);
        Ok(())
    }

    /// Change the PIN after checking the confirmation locally.
    #[allow(clippy::print_stdout)]
    pub async fn change_pin(&mut self, new_pin: &str, confirm: &str) -> Result<(), CommandError> {
        let pin = confirmed_pin(new_pin, confirm)?;
        self.client
            .change_pin(&self.credential()?, pin.as_str())
            .await?;
        self.gate.rotate(&pin);
        println!("PIN updated");
        Ok(())
    }
}

/// Validate a new PIN and its confirmation before anything is sent.
fn confirmed_pin(new_pin: &str, confirm: &str) -> Result<Pin, CommandError> {
    let pin = Pin::parse(new_pin)?;
    if new_pin != confirm {
        return Err(CommandError::PinMismatch);
    }
    Ok(pin)
}

fn new_product(millis: i64, fields: ProductFields) -> Product {
    let mut product = Product {
        id: ProductId::from_timestamp(millis),
        title: NEW_PRODUCT_TITLE.to_owned(),
        category: FALLBACK_CATEGORY.to_owned(),
        price: Price::ZERO,
        stock: 0,
    };
    fields.apply(&mut product);
    product
}

/// A pushed file goes through the same coercion as a server save.
///
/// Anything but a top-level array is refused before a request is made, so a
/// mis-shaped file can never replace the catalog with an empty list.
fn products_from_file(doc: &Value) -> Result<Vec<Product>, CommandError> {
    let entries = doc.as_array().ok_or(CommandError::InvalidProductFile)?;
    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Product::from_entry(entry, index))
        .collect())
}
