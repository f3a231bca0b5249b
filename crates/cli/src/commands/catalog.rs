//! Storefront browsing.
//!
//! # Usage
//!
//! ```bash
//! kiosk catalog
//! kiosk catalog --category Snacks
//! ```

use vending_kiosk_core::{CartPanelView, CatalogView, KioskSession, StatusView};

use super::CommandError;
use crate::client::KioskClient;

/// Fetch both snapshots into a fresh session.
pub async fn load_session(client: &KioskClient) -> Result<KioskSession, CommandError> {
    let (products, config) = tokio::try_join!(client.products(), client.config())?;
    tracing::debug!(products = products.len(), status = %config.status, "snapshot loaded");

    let mut session = KioskSession::new();
    session.apply_snapshot(products, config);
    Ok(session)
}

/// Print the catalog, optionally narrowed to one category.
pub async fn show(client: &KioskClient, category: Option<&str>) -> Result<(), CommandError> {
    let mut session = load_session(client).await?;
    if let Some(category) = category {
        session.set_filter(category);
    }

    let status = session.status();
    print_status(&status);
    if status.overlay.is_some() {
        return Ok(());
    }
    print_catalog(&session.catalog());
    Ok(())
}

#[allow(clippy::print_stdout)]
pub fn print_status(status: &StatusView) {
    println!("[{}]", status.label);
    if let Some(banner) = status.banner {
        println!("{banner}");
    }
    if let Some(overlay) = &status.overlay {
        println!();
        println!("  {}", overlay.title);
        println!("  {}", overlay.message);
    }
}

#[allow(clippy::print_stdout)]
pub fn print_catalog(view: &CatalogView) {
    let mut filters = vec!["all".to_string()];
    filters.extend(view.categories.iter().cloned());
    let bar: Vec<String> = filters
        .iter()
        .map(|f| {
            if f == view.active.as_str() {
                format!("<{f}>")
            } else {
                f.clone()
            }
        })
        .collect();
    println!("{}", bar.join("  "));
    println!();

    if let Some(message) = view.empty_message() {
        println!("{message}");
        return;
    }

    for card in &view.cards {
        let cart = if card.in_cart > 0 {
            format!("  (x{} in cart)", card.in_cart)
        } else {
            String::new()
        };
        println!(
            "{:<16} {:<24} {:<10} {:>10}  {}{cart}",
            card.id.as_str(),
            card.title,
            card.category,
            card.price.display(),
            card.stock_label(),
        );
    }
}

#[allow(clippy::print_stdout)]
pub fn print_cart(panel: &CartPanelView) {
    println!("Cart: {}", panel.item_count_label());
    if let Some(message) = panel.message {
        println!("  {message}");
    }
    for line in &panel.lines {
        println!(
            "  {:<24} {:>3} x {:>10} = {}",
            line.title,
            line.quantity,
            line.price.display(),
            vending_kiosk_core::format_amount(line.total),
        );
    }
    println!("Total: {}", panel.total_label());
    let marker = if panel.checkout_enabled { "" } else { " (disabled)" };
    println!("[{}]{marker}", panel.checkout_label);
}
