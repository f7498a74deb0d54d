//! Cart store and cart rendering.
//!
//! [`CartStore`] owns every read and write of the persisted cart. Each
//! operation loads the whole cart from its [`CartStorage`] slot, applies one
//! change and writes the whole cart back. There is no caching between calls.

pub mod view;

use cartwheel_core::{Cart, Price, Product, ProductId, QuantityChange};
use tracing::{debug, instrument, warn};

use crate::storage::{CART_KEY, CartStorage, StorageError};

pub use view::{CartItemView, CartView, parse_quantity_input};

/// Persistence-backed cart operations over a storage port.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store over the given storage slot.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the persisted cart.
    ///
    /// A missing, unreadable or malformed value yields an empty cart; the
    /// failure is logged and never returned.
    pub async fn load(&self) -> Cart {
        let raw = match self.storage.get_item(CART_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!("Failed to read stored cart, starting empty: {e}");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Stored cart is malformed, starting empty: {e}");
            Cart::new()
        })
    }

    /// Replace the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be serialized or written.
    pub async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set_item(CART_KEY, raw).await
    }

    /// Add one unit of a product and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be saved.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(&self, product: Product) -> Result<Cart, StorageError> {
        let mut cart = self.load().await;
        cart.add(product);
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Remove a line and return the updated cart.
    ///
    /// Removing an id that is not in the cart is a no-op, but the cart is
    /// still written back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be saved.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn remove(&self, id: &ProductId) -> Result<Cart, StorageError> {
        let mut cart = self.load().await;
        if !cart.remove(id) {
            debug!("Remove requested for a line that is not in the cart");
        }
        self.save(&cart).await?;
        Ok(cart)
    }

    /// Set a line's quantity and return the updated cart.
    ///
    /// A quantity of zero or less removes the line. An id that is not in the
    /// cart leaves storage untouched and returns the cart as loaded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be saved.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Cart, StorageError> {
        let mut cart = self.load().await;

        match cart.set_quantity(id, quantity) {
            QuantityChange::Missing => {
                debug!("Quantity change requested for a line that is not in the cart");
            }
            QuantityChange::Removed | QuantityChange::Updated => self.save(&cart).await?,
        }

        Ok(cart)
    }

    /// Sum of `price * quantity` over the persisted cart.
    pub async fn total(&self) -> Price {
        self.load().await.items_total()
    }

    /// Total number of units in the persisted cart.
    pub async fn item_count(&self) -> u32 {
        self.load().await.item_count()
    }
}
