//! Catalog products and cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product as shown on the listing screens.
///
/// This is the descriptor handed to the cart when the user taps "add to
/// cart"; it carries no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

/// A product line in the cart.
///
/// Serialized flat, so a persisted cart looks like
/// `[{"id":"1","title":"...","image_url":"...","price":10,"quantity":2}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Create a line item holding a single unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The catalog ID of this line.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }
}

impl From<Product> for CartItem {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}
