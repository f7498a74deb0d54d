//! Products as captured from rendered product cards.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{Price, PriceError};

/// Errors that can occur when reading a product from a card.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductCardError {
    /// The card's price text could not be read as an amount.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// The raw text a product card exposes when its add-to-cart control fires.
///
/// This is the boundary with the page markup: the title text, the formatted
/// price text and the image source, exactly as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductCard {
    /// Product title text.
    pub title: String,
    /// Formatted price text, e.g. `"$12.50"`.
    pub price: String,
    /// Image source URL.
    pub image: String,
}

impl ProductCard {
    /// Read a typed product from the card.
    ///
    /// The id is derived from the title on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ProductCardError::InvalidPrice`] if the price text has no
    /// readable number.
    pub fn into_product(self) -> Result<Product, ProductCardError> {
        let price = Price::parse_display_text(&self.price)?;

        Ok(Product {
            id: ProductId::from_name(&self.title),
            name: self.title,
            price,
            image: self.image,
        })
    }
}

/// A product ready to be added to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}
