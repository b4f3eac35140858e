//! Local key-value storage for the persisted cart.
//!
//! The cart only needs the smallest possible contract from device storage:
//! read a string by key, write a string by key, last write wins. Both
//! operations are async so a backend may hit the disk without blocking the
//! UI thread.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used in tests and previews
//! - [`FileStore`] - one file per key inside a data directory

mod file;
mod memory;

use std::future::Future;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Asynchronous string key-value store.
///
/// Implementations must be cheap to share across tasks; the cart writer
/// holds its own handle for the lifetime of the store.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str)
    -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Check that `key` is usable by every backend.
///
/// Keys double as file names for [`FileStore`], so they are limited to ASCII
/// letters, digits, `_`, `-` and `.`, and may not start with a dot.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] if the key is empty or contains
/// other characters.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_simple_names() {
        assert!(validate_key("products").is_ok());
        assert!(validate_key("cart-v2.json").is_ok());
        assert!(validate_key("user_42").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        for key in ["", ".hidden", "../escape", "a/b", "a\\b", "spaced key"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
