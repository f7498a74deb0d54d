//! Durable key-value storage for the cart.
//!
//! The cart is kept in a single string slot, the way a browser keeps values
//! in local storage. [`CartStorage`] is the port the cart store talks to:
//!
//! - [`SessionStorage`] - slot inside the shopper's session record, persisted
//!   in SQLite and scoped to the browser by the session cookie
//! - [`MemoryStorage`] - process-local slot for tests

mod memory;
mod session;

use std::future::Future;

use thiserror::Error;

pub use memory::MemoryStorage;
pub use session::{SessionCartStore, SessionStorage};

/// Slot key holding the serialized cart.
pub const CART_KEY: &str = "shopping_cart";

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The session record could not be read or written.
    #[error("session storage error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The cart could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string key-value slot that survives page reloads.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value stored under `key`.
    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
