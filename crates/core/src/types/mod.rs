//! Core types for Cartwheel.
//!
//! This module provides the cart domain: product ids, prices, products read
//! from product cards, and the cart with its totals.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine, CartSummary, DELIVERY_FEE_CENTS, QuantityChange};
pub use id::ProductId;
pub use price::{CURRENCY_SYMBOL, MAX_SCALE, MAX_WHOLE_UNITS, Price, PriceError};
pub use product::{Product, ProductCard, ProductCardError};
