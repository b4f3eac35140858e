//! GoMarketplace Cart - client-side shopping cart state.
//!
//! Holds the ordered list of products the user intends to buy, exposes the
//! add / increment / decrement mutators to UI components, and keeps a
//! durable copy in a local key-value store so the cart survives restarts.
//!
//! # Architecture
//!
//! - [`Cart`] is the pure, synchronous list with the quantity rules.
//! - [`KeyValueStore`] abstracts the device storage; [`MemoryStore`] and
//!   [`FileStore`] are the bundled backends.
//! - [`CartStore`] pairs a `Cart` with a background writer task. Mutators
//!   update memory immediately and hand the serialized list to the writer
//!   without waiting for the disk.
//! - [`CartSession`] owns the single cart of an application session and is
//!   passed explicitly to the components that need it.
//!
//! # Example
//!
//! ```rust,no_run
//! use go_marketplace_cart::{CartConfig, CartSession, MemoryStore};
//! use go_marketplace_core::{Price, Product, ProductId};
//!
//! # async fn demo() -> Result<(), go_marketplace_cart::SessionError> {
//! let session = CartSession::new();
//! session.initialize(MemoryStore::new(), CartConfig::default()).await?;
//!
//! let cart = session.cart()?;
//! cart.add_to_cart(Product {
//!     id: ProductId::new("A"),
//!     title: "Widget".to_string(),
//!     image_url: "https://cdn.example.com/a.png".to_string(),
//!     price: Price::from_cents(1000),
//! });
//! cart.flush().await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;
mod writer;

pub use cart::Cart;
pub use config::{CartConfig, ConfigError};
pub use error::{DecodeError, SessionError, StorageError};
pub use session::CartSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;
