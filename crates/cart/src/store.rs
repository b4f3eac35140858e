//! Shared cart state for UI components.
//!
//! A [`CartStore`] is the one live cart of an application session. Handles
//! are cheap to clone and all of them see the same list. Every mutation
//! updates memory first and then queues the full serialized list for the
//! background writer; callers never wait on storage.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use go_marketplace_core::{CartItem, Product, ProductId};
use tracing::{debug, error, info, instrument, warn};

use crate::cart::Cart;
use crate::config::CartConfig;
use crate::storage::KeyValueStore;
use crate::writer::Writer;

/// Cloneable handle to the session cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    cart: RwLock<Cart>,
    writer: Writer,
    storage_key: String,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.inner.storage_key)
            .field("items", &self.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the persisted cart once and start the background writer.
    ///
    /// A missing value starts an empty cart. A value that cannot be read or
    /// decoded is logged and also starts an empty cart; it will be replaced
    /// by the next mutation.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all, fields(key = %config.storage_key))]
    pub async fn load<S: KeyValueStore>(store: S, config: &CartConfig) -> Self {
        let storage_key = config.storage_key.clone();

        let cart = match store.get(&storage_key).await {
            Ok(Some(json)) => match Cart::from_json(&json) {
                Ok(cart) => {
                    info!(items = cart.len(), "Loaded persisted cart");
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable persisted cart");
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!("No persisted cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Cart::new()
            }
        };

        let writer = Writer::spawn(store, storage_key.clone());

        Self {
            inner: Arc::new(CartStoreInner {
                cart: RwLock::new(cart),
                writer,
                storage_key,
            }),
        }
    }

    /// Snapshot of the cart lines in order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.read(|cart| cart.items().to_vec())
    }

    /// Snapshot of the whole cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.read(Cart::clone)
    }

    /// The line for `id`, if it is in the cart.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<CartItem> {
        self.read(|cart| cart.get(id).cloned())
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(Cart::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(Cart::is_empty)
    }

    /// Sum of all line quantities (the badge on the cart icon).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.read(Cart::total_quantity)
    }

    /// Add one unit of `product`, appending it if it is not in the cart yet.
    pub fn add_to_cart(&self, product: Product) {
        let id = product.id.clone();
        self.mutate(|cart| {
            cart.add(product);
            true
        });
        debug!(id = %id, "Added product to cart");
    }

    /// Add one unit of `id`. Returns `false` (and persists nothing) when the
    /// product is not in the cart.
    pub fn increment(&self, id: &ProductId) -> bool {
        let changed = self.mutate(|cart| cart.increment(id));
        if !changed {
            debug!(id = %id, "Ignoring increment for product not in cart");
        }
        changed
    }

    /// Remove one unit of `id`, dropping the line when it reaches zero.
    /// Returns `false` (and persists nothing) when the product is not in the
    /// cart.
    pub fn decrement(&self, id: &ProductId) -> bool {
        let changed = self.mutate(|cart| cart.decrement(id));
        if !changed {
            debug!(id = %id, "Ignoring decrement for product not in cart");
        }
        changed
    }

    /// Wait for every mutation made so far to reach storage (or fail to).
    pub async fn flush(&self) {
        self.inner.writer.flush().await;
    }

    fn read<T>(&self, f: impl FnOnce(&Cart) -> T) -> T {
        let cart = self
            .inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cart> {
        self.inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` and, if it changed the cart, queue the new list for storage.
    ///
    /// The lock is held while publishing so snapshots reach the writer in
    /// mutation order.
    fn mutate(&self, f: impl FnOnce(&mut Cart) -> bool) -> bool {
        let mut cart = self.write();
        if !f(&mut cart) {
            return false;
        }
        match cart.to_json() {
            Ok(json) => self.inner.writer.publish(json),
            Err(e) => error!(error = %e, "Failed to serialize cart"),
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use go_marketplace_core::Price;

    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            image_url: format!("https://cdn.example.com/{id}.png"),
            price: Price::from_cents(1000),
        }
    }

    /// Counts writes and forwards them to a memory store.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Arc<AtomicUsize>,
    }

    impl KeyValueStore for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }
    }

    /// Every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unavailable"),
            })
        }

        async fn set(&self, key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unavailable"),
            })
        }
    }

    #[tokio::test]
    async fn test_load_without_persisted_value_is_empty() {
        let cart = CartStore::load(MemoryStore::new(), &CartConfig::default()).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_restores_persisted_cart() {
        let store = MemoryStore::new();
        store.insert(
            "products",
            r#"[{"id":"A","title":"Widget","image_url":"x","price":10,"quantity":2}]"#,
        );

        let cart = CartStore::load(store, &CartConfig::default()).await;
        let item = cart.get(&ProductId::new("A")).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.product.title, "Widget");
    }

    #[tokio::test]
    async fn test_load_corrupt_value_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.insert("products", "{not json");

        let cart = CartStore::load(store, &CartConfig::default()).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_read_error_falls_back_to_empty() {
        let cart = CartStore::load(BrokenStore, &CartConfig::default()).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_are_persisted_under_configured_key() {
        let store = MemoryStore::new();
        let config = CartConfig {
            storage_key: "cart-v2".to_string(),
            ..CartConfig::default()
        };
        let cart = CartStore::load(store.clone(), &config).await;

        cart.add_to_cart(product("A"));
        cart.flush().await;

        let persisted = Cart::from_json(&store.peek("cart-v2").unwrap()).unwrap();
        assert_eq!(persisted, cart.snapshot());
        assert_eq!(store.peek("products"), None);
    }

    #[tokio::test]
    async fn test_rapid_mutations_coalesce_into_one_write() {
        let store = CountingStore::default();
        let cart = CartStore::load(store.clone(), &CartConfig::default()).await;

        cart.add_to_cart(product("A"));
        cart.add_to_cart(product("B"));
        cart.increment(&ProductId::new("A"));
        cart.flush().await;

        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        let persisted = Cart::from_json(&store.inner.peek("products").unwrap()).unwrap();
        assert_eq!(persisted.total_quantity(), 3);
    }

    #[tokio::test]
    async fn test_unknown_id_does_not_write() {
        let store = CountingStore::default();
        let cart = CartStore::load(store.clone(), &CartConfig::default()).await;

        assert!(!cart.increment(&ProductId::new("ghost")));
        assert!(!cart.decrement(&ProductId::new("ghost")));
        cart.flush().await;

        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory_state() {
        let cart = CartStore::load(BrokenStore, &CartConfig::default()).await;

        cart.add_to_cart(product("A"));
        cart.add_to_cart(product("A"));
        cart.flush().await;

        assert_eq!(cart.get(&ProductId::new("A")).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cart = CartStore::load(MemoryStore::new(), &CartConfig::default()).await;
        let other = cart.clone();

        cart.add_to_cart(product("A"));
        assert_eq!(other.total_quantity(), 1);
        assert!(other.decrement(&ProductId::new("A")));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_flush_without_mutations_returns() {
        let cart = CartStore::load(MemoryStore::new(), &CartConfig::default()).await;
        cart.flush().await;
        assert!(format!("{cart:?}").contains("products"));
    }
}
