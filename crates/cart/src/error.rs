//! Error types for the cart crate.
//!
//! Only [`SessionError`] ever reaches UI code. Storage and decode failures
//! are logged by the store and recovered locally: the cart is a convenience
//! cache, not a system of record.

use go_marketplace_core::ProductId;
use thiserror::Error;

/// Errors from the key-value storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A persisted cart blob that cannot be turned back into a cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed cart JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    #[error("product {0} appears more than once")]
    DuplicateId(ProductId),
}

/// Misuse of the session-scoped cart.
///
/// These are programming errors: the caller wired components up in the
/// wrong order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active cart context: initialize the cart session before using it")]
    NoActiveCart,

    #[error("cart session is already initialized")]
    AlreadyInitialized,
}
