//! Type-safe unit price using decimal arithmetic.
//!
//! Prices come from the catalog without currency information, so this type
//! only guards against float rounding and negative amounts. On the wire a
//! price is a plain JSON number (`"price": 10` or `"price": 19.9`) so that
//! carts persisted by earlier app versions keep loading.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors produced when building a price from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("invalid price '{0}'")]
    Invalid(String),
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A unit price in the store's (unspecified) currency.
///
/// Negative amounts are rejected both when parsing text and when reading
/// JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "deserialize_non_negative"
    )]
    Decimal,
);

fn deserialize_non_negative<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = rust_decimal::serde::float::deserialize(deserializer)?;
    if amount < Decimal::ZERO {
        return Err(D::Error::custom(PriceError::Negative(amount)));
    }
    Ok(amount)
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
