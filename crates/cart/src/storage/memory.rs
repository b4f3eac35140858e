//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::StorageError;

use super::{KeyValueStore, validate_key};

/// Process-local store backed by a shared map.
///
/// Clones share the same map, so a cart reloaded from a clone sees exactly
/// what an earlier cart wrote, the same way two launches of the app see the
/// same device storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value synchronously (tests, fixtures).
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Read a value synchronously.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        self.insert(key, value);
        Ok(())
    }
}
