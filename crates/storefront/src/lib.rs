//! Cartwheel Storefront library.
//!
//! Serves a static page set and the shopping cart behind it. The cart is
//! kept in the shopper's session and rendered on the server; HTMX carries
//! page events back to the cart routes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
