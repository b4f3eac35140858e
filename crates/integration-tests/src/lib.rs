//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart behavior through the session API
//! - `cart_persistence` - Reloading carts from memory and file storage
//!
//! This library only holds fixtures shared by the test binaries.

use go_marketplace_core::{Price, Product, ProductId};
use tempfile::TempDir;

/// A catalog product with a deterministic title, image and price.
#[must_use]
pub fn product(id: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price: Price::from_cents(1000),
    }
}

/// A fresh temporary directory, removed when the returned guard drops.
///
/// # Panics
///
/// Panics if the system temp dir is not writable.
#[must_use]
pub fn scratch_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
