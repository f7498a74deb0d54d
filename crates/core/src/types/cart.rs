//! Cart lines, the cart itself and its summary totals.
//!
//! These are pure in-memory operations. Persistence lives in the storefront's
//! cart store, which loads a [`Cart`], applies one of these operations and
//! writes the whole cart back.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Flat delivery fee charged once per non-empty cart, in cents.
pub const DELIVERY_FEE_CENTS: i64 = 500;

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Unit price captured when the product was first added.
    pub price: Price,
    pub image: String,
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price * self.quantity.get()
    }
}

impl From<Product> for CartLine {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: NonZeroU32::MIN,
        }
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line has the requested id; the cart is untouched.
    Missing,
    /// The requested quantity was not positive, so the line was removed.
    Removed,
    /// The line now has the requested quantity.
    Updated,
}

/// An insertion-ordered list of cart lines with unique ids.
///
/// Serializes as a plain JSON array of lines. When deserializing, later lines
/// that repeat an earlier id are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Add one unit of a product.
    ///
    /// An existing line with the same id gets its quantity incremented and
    /// keeps its original name, price and image. Otherwise a new line with
    /// quantity 1 is appended.
    pub fn add(&mut self, product: Product) {
        match self.lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from(product)),
        }
    }

    /// Remove the line with the given id.
    ///
    /// Returns `false` if there was no such line.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Quantities above
    /// `u32::MAX` are clamped.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> QuantityChange {
        let Some(line) = self.lines.iter_mut().find(|line| &line.id == id) else {
            return QuantityChange::Missing;
        };

        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        match NonZeroU32::new(clamped) {
            Some(quantity) => {
                line.quantity = quantity;
                QuantityChange::Updated
            }
            None => {
                self.remove(id);
                QuantityChange::Removed
            }
        }
    }

    /// Sum of `price * quantity` over all lines, without rounding.
    #[must_use]
    pub fn items_total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity.get()))
    }

    /// Items total, delivery fee and grand total.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::new(self.items_total(), !self.is_empty())
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(mut lines: Vec<CartLine>) -> Self {
        let mut seen = HashSet::with_capacity(lines.len());
        lines.retain(|line| seen.insert(line.id.clone()));
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// Cart totals shown next to the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub items_total: Price,
    pub delivery: Price,
    pub grand_total: Price,
}

impl CartSummary {
    /// Build a summary; the delivery fee applies only when the cart has items.
    #[must_use]
    pub fn new(items_total: Price, has_items: bool) -> Self {
        let delivery = if has_items {
            Price::from_cents(DELIVERY_FEE_CENTS)
        } else {
            Price::ZERO
        };

        Self {
            items_total,
            delivery,
            grand_total: items_total + delivery,
        }
    }
}
