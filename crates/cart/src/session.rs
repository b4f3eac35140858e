//! The per-session cart slot.
//!
//! An application creates one [`CartSession`] at startup, initializes it once
//! storage is available, and passes it (or the [`CartStore`] handle it hands
//! out) to whichever screens need the cart. Reaching for the cart before
//! initialization is a wiring bug and fails fast with
//! [`SessionError::NoActiveCart`].

use std::sync::OnceLock;

use tracing::{info, instrument};

use crate::config::CartConfig;
use crate::error::SessionError;
use crate::storage::KeyValueStore;
use crate::store::CartStore;

/// Holds the single cart of an application session.
#[derive(Debug, Default)]
pub struct CartSession {
    cart: OnceLock<CartStore>,
}

impl CartSession {
    /// Create an uninitialized session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cart: OnceLock::new(),
        }
    }

    /// Load the persisted cart from `store` and make it the session cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyInitialized`] if the session already
    /// has a cart.
    #[instrument(skip_all)]
    pub async fn initialize<S: KeyValueStore>(
        &self,
        store: S,
        config: CartConfig,
    ) -> Result<CartStore, SessionError> {
        if self.cart.get().is_some() {
            return Err(SessionError::AlreadyInitialized);
        }

        let cart = CartStore::load(store, &config).await;
        self.cart
            .set(cart.clone())
            .map_err(|_| SessionError::AlreadyInitialized)?;

        info!(items = cart.len(), "Cart session initialized");
        Ok(cart)
    }

    /// Whether [`CartSession::initialize`] has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.cart.get().is_some()
    }

    /// The session cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveCart`] before initialization.
    pub fn cart(&self) -> Result<&CartStore, SessionError> {
        self.cart.get().ok_or(SessionError::NoActiveCart)
    }
}
