//! End-to-end: API snapshots driving a kiosk session.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};
use vending_kiosk_core::{
    CartError, CategoryFilter, KioskConfig, KioskSession, KioskStatus, Product, ProductId,
};
use vending_kiosk_integration_tests::{TEST_PIN, TestKiosk};

async fn snapshot(kiosk: &TestKiosk) -> (Vec<Product>, KioskConfig) {
    let products: Vec<Product> =
        serde_json::from_value(kiosk.get("/api/products").await.body).unwrap();
    let config: KioskConfig = serde_json::from_value(kiosk.get("/api/config").await.body).unwrap();
    (products, config)
}

async fn save(kiosk: &TestKiosk, path: &str, body: Value) {
    let resp = kiosk.post(path, &body, Some(TEST_PIN)).await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
}

async fn stocked_kiosk() -> TestKiosk {
    let kiosk = TestKiosk::new();
    save(
        &kiosk,
        "/api/products",
        json!({"products": [
            {"id": "cola", "title": "Cola", "category": "Drinks", "price": 30, "stock": 2},
            {"id": "chips", "title": "Chips", "category": "Snacks", "price": 20, "stock": 5}
        ]}),
    )
    .await;
    save(
        &kiosk,
        "/api/config",
        json!({"status": "live", "categories": ["Drinks", "Snacks"]}),
    )
    .await;
    kiosk
}

#[tokio::test]
async fn test_cart_never_exceeds_served_stock() {
    let kiosk = stocked_kiosk().await;
    let (products, config) = snapshot(&kiosk).await;
    let mut session = KioskSession::new();
    session.apply_snapshot(products, config);

    let cola = ProductId::new("cola");
    for _ in 0..5 {
        session.change_quantity(&cola, 1).unwrap();
    }
    assert_eq!(session.cart().quantity_of(&cola), 2);

    let panel = session.cart_panel();
    assert_eq!(panel.total_label(), "₹60.00");
    assert!(panel.checkout_enabled);
}

#[tokio::test]
async fn test_out_of_service_disables_storefront() {
    let kiosk = stocked_kiosk().await;
    let mut session = KioskSession::new();
    let (products, config) = snapshot(&kiosk).await;
    session.apply_snapshot(products, config);
    session.change_quantity(&ProductId::new("chips"), 1).unwrap();

    save(
        &kiosk,
        "/api/config",
        json!({"status": "out_of_service", "categories": ["Drinks", "Snacks"]}),
    )
    .await;
    let (products, config) = snapshot(&kiosk).await;
    session.apply_snapshot(products, config);

    let status = session.status();
    assert_eq!(status.status, KioskStatus::OutOfService);
    assert!(status.overlay.is_some());
    assert!(
        session
            .catalog()
            .cards
            .iter()
            .all(|card| !card.can_increment && !card.can_decrement)
    );

    let panel = session.cart_panel();
    assert!(!panel.checkout_enabled);
    assert_eq!(
        session.checkout(),
        Err(CartError::Unavailable(KioskStatus::OutOfService))
    );
}

#[tokio::test]
async fn test_admin_restock_reconciles_open_cart() {
    let kiosk = stocked_kiosk().await;
    let mut session = KioskSession::new();
    let (products, config) = snapshot(&kiosk).await;
    session.apply_snapshot(products, config);

    let chips = ProductId::new("chips");
    for _ in 0..4 {
        session.change_quantity(&chips, 1).unwrap();
    }
    session.set_filter("Snacks");

    save(
        &kiosk,
        "/api/products",
        json!({"products": [
            {"id": "cola", "title": "Cola", "category": "Drinks", "price": 30, "stock": 2},
            {"id": "chips", "title": "Chips", "category": "Snacks", "price": 20, "stock": 1}
        ]}),
    )
    .await;
    save(
        &kiosk,
        "/api/config",
        json!({"status": "live", "categories": ["Drinks"]}),
    )
    .await;
    let (products, config) = snapshot(&kiosk).await;
    let touched = session.apply_snapshot(products, config);

    assert_eq!(touched, 1);
    assert_eq!(session.cart().quantity_of(&chips), 1);
    assert_eq!(session.filter(), &CategoryFilter::All);
    let card = session
        .catalog()
        .cards
        .into_iter()
        .find(|card| card.id == chips)
        .unwrap();
    assert_eq!(card.stock_label(), "Out of stock");
}

#[tokio::test]
async fn test_negative_stock_reads_as_sold_out() {
    let kiosk = TestKiosk::new();
    save(
        &kiosk,
        "/api/products",
        json!({"products": [{"id": "gum", "price": 5, "stock": -3}]}),
    )
    .await;
    let (products, config) = snapshot(&kiosk).await;
    assert_eq!(products[0].stock, -3);

    let mut session = KioskSession::new();
    session.apply_snapshot(products, config);
    session.change_quantity(&ProductId::new("gum"), 1).unwrap();
    assert!(session.cart().is_empty());
    assert_eq!(session.catalog().cards[0].stock_left, 0);
}
