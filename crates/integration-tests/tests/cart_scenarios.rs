//! Integration tests for cart behavior through the session API.
//!
//! These tests use the in-memory store and need no external services.

#![allow(clippy::unwrap_used)]

use go_marketplace_cart::{CartConfig, CartSession, CartStore, MemoryStore, SessionError};
use go_marketplace_core::{Price, Product, ProductId};
use go_marketplace_integration_tests::product;

async fn fresh_cart() -> CartStore {
    CartStore::load(MemoryStore::new(), &CartConfig::default()).await
}

fn quantities(cart: &CartStore) -> Vec<(String, u32)> {
    cart.products()
        .into_iter()
        .map(|item| (item.product.id.into_inner(), item.quantity))
        .collect()
}

// =============================================================================
// Add / Increment / Decrement
// =============================================================================

#[tokio::test]
async fn test_distinct_adds_give_one_line_each() {
    let cart = fresh_cart().await;
    let ids = ["1", "2", "3", "4", "5"];
    for id in ids {
        cart.add_to_cart(product(id));
    }

    assert_eq!(cart.len(), ids.len());
    assert!(cart.products().iter().all(|item| item.quantity == 1));
    let order: Vec<String> = cart
        .products()
        .into_iter()
        .map(|item| item.product.id.into_inner())
        .collect();
    assert_eq!(order, ids);
}

#[tokio::test]
async fn test_increment_leaves_other_lines_untouched() {
    let cart = fresh_cart().await;
    for id in ["A", "B", "C"] {
        cart.add_to_cart(product(id));
    }
    let before = cart.products();

    assert!(cart.increment(&ProductId::new("B")));

    let after = cart.products();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.product, new.product);
        let expected = if old.product.id.as_str() == "B" {
            old.quantity + 1
        } else {
            old.quantity
        };
        assert_eq!(new.quantity, expected);
    }
}

#[tokio::test]
async fn test_increment_then_decrement_restores_cart() {
    let cart = fresh_cart().await;
    cart.add_to_cart(product("A"));
    cart.add_to_cart(product("B"));
    cart.add_to_cart(product("B"));

    for id in ["A", "B"] {
        let before = cart.products();
        let id = ProductId::new(id);
        cart.increment(&id);
        cart.decrement(&id);
        assert_eq!(cart.products(), before);
    }
}

#[tokio::test]
async fn test_unknown_ids_are_ignored() {
    let cart = fresh_cart().await;
    cart.add_to_cart(product("A"));
    let before = cart.products();

    assert!(!cart.increment(&ProductId::new("nope")));
    assert!(!cart.decrement(&ProductId::new("nope")));
    assert_eq!(cart.products(), before);
}

#[tokio::test]
async fn test_widget_walkthrough() {
    let cart = fresh_cart().await;
    let widget = Product {
        id: ProductId::new("A"),
        title: "Widget".to_string(),
        image_url: "x".to_string(),
        price: Price::from_cents(1000),
    };
    let a = ProductId::new("A");

    cart.add_to_cart(widget.clone());
    assert_eq!(quantities(&cart), vec![("A".to_string(), 1)]);
    assert_eq!(cart.get(&a).unwrap().product, widget);

    cart.add_to_cart(widget);
    assert_eq!(quantities(&cart), vec![("A".to_string(), 2)]);

    assert!(cart.decrement(&a));
    assert_eq!(quantities(&cart), vec![("A".to_string(), 1)]);

    assert!(cart.decrement(&a));
    assert!(cart.products().is_empty());
}

// =============================================================================
// Session wiring
// =============================================================================

#[tokio::test]
async fn test_session_hands_out_shared_cart() {
    let session = CartSession::new();
    assert_eq!(session.cart().unwrap_err(), SessionError::NoActiveCart);

    let from_init = session
        .initialize(MemoryStore::new(), CartConfig::default())
        .await
        .unwrap();
    from_init.add_to_cart(product("A"));

    // A second screen asking the session sees the same cart.
    let from_lookup = session.cart().unwrap();
    assert!(from_lookup.increment(&ProductId::new("A")));
    assert_eq!(from_init.total_quantity(), 2);
}
