//! GoMarketplace Core - Shared types library.
//!
//! This crate provides the types shared by every GoMarketplace component:
//! - `cart` - Client-side cart state and its persistence
//! - `cli` - Developer tooling for inspecting and editing a local cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   catalog product and cart line item records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
