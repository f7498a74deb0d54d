//! Cartwheel Core - Cart domain types.
//!
//! This crate provides the types shared by the Cartwheel components:
//! - `storefront` - Static page set, cart page and cart mutations over HTTP
//! - `integration-tests` - Black-box tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage, no HTTP. Loading and saving a cart is the storefront's job.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, product cards, carts and cart totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
