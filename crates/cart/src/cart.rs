//! The in-memory cart list.
//!
//! [`Cart`] is an ordered list of [`CartItem`]s, unique by product ID, in
//! which every quantity is at least one. It is plain data: no I/O and no
//! locking. [`crate::CartStore`] wraps it for shared use.

use go_marketplace_core::{CartItem, Product, ProductId};
use serde::Serialize;

use crate::error::DecodeError;

/// Ordered list of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing lines, checking the list invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ZeroQuantity`] if a line has quantity 0, or
    /// [`DecodeError::DuplicateId`] if two lines share a product ID.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, DecodeError> {
        for (pos, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(DecodeError::ZeroQuantity(item.id().clone()));
            }
            if items.iter().take(pos).any(|other| other.id() == item.id()) {
                return Err(DecodeError::DuplicateId(item.id().clone()));
            }
        }
        Ok(Self { items })
    }

    /// Decode a cart persisted by [`Cart::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the blob is not a JSON array of cart lines
    /// or breaks the list invariants.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let items: Vec<CartItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Serialize the whole list as a single JSON array.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart keeps its position and has its quantity
    /// bumped; the stored title, image and price are left as they were. A
    /// new product is appended with quantity 1.
    pub fn add(&mut self, product: Product) {
        match self.position(&product.id) {
            Some(index) => self.bump(index),
            None => self.items.push(CartItem::new(product)),
        }
    }

    /// Increase the quantity of `id` by one.
    ///
    /// Returns `false` without touching the list when `id` is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.bump(index);
        true
    }

    /// Decrease the quantity of `id` by one, removing the line at zero.
    ///
    /// Returns `false` without touching the list when `id` is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if item.quantity <= 1 {
            self.items.remove(index);
        } else {
            item.quantity -= 1;
        }
        true
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn bump(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }
}
