//! Cart commands.
//!
//! Every command opens the session cart from the configured data directory,
//! applies at most one mutation, and waits for it to reach disk before the
//! process exits.

use go_marketplace_cart::{CartConfig, CartSession, CartStore, ConfigError, SessionError};
use go_marketplace_core::{Price, Product, ProductId};
use thiserror::Error;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("product {0} is not in the cart")]
    NotInCart(String),
}

/// Load configuration and initialize the session cart on a file store.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub async fn open_cart() -> Result<CartStore, CommandError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(dir = %config.data_dir.display(), "Opening cart");

    let store = config.file_store();
    let session = CartSession::new();
    Ok(session.initialize(store, config).await?)
}

pub fn add(cart: &CartStore, id: String, title: String, image_url: String, price: Price) {
    cart.add_to_cart(Product {
        id: ProductId::new(id),
        title,
        image_url,
        price,
    });
}

/// # Errors
///
/// Returns [`CommandError::NotInCart`] if `id` is not in the cart.
pub fn increment(cart: &CartStore, id: &str) -> Result<(), CommandError> {
    if cart.increment(&ProductId::new(id)) {
        Ok(())
    } else {
        Err(CommandError::NotInCart(id.to_string()))
    }
}

/// # Errors
///
/// Returns [`CommandError::NotInCart`] if `id` is not in the cart.
pub fn decrement(cart: &CartStore, id: &str) -> Result<(), CommandError> {
    if cart.decrement(&ProductId::new(id)) {
        Ok(())
    } else {
        Err(CommandError::NotInCart(id.to_string()))
    }
}

/// Render the cart as a plain table on stdout.
#[allow(clippy::print_stdout)]
pub fn print_cart(cart: &CartStore) {
    let items = cart.products();
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in &items {
        println!(
            "{:>4} x {:<12} {:>10}  {}",
            item.quantity,
            item.product.id,
            item.product.price,
            item.product.title
        );
    }
    println!("{} item(s)", cart.total_quantity());
}
