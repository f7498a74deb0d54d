//! Cart display data for templates.
//!
//! Views are plain strings computed from a [`Cart`], so rendering the same
//! cart twice produces identical markup.

use cartwheel_core::{Cart, CartLine};

/// Line item display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart display data: line items plus summary totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub items_total: String,
    pub delivery: String,
    pub grand_total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            price: line.price.display(),
            quantity: line.quantity.get(),
            subtotal: line.subtotal().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            items_total: summary.items_total.display(),
            delivery: summary.delivery.display(),
            grand_total: summary.grand_total.display(),
            item_count: cart.item_count(),
        }
    }
}

/// Read the value of a quantity input.
///
/// Leading whitespace is skipped, then an optional sign and the digits that
/// follow are read; anything after the digits is ignored (`"3 mugs"` is 3).
/// Input with no digits, and input that reads as zero, becomes 1. Negative
/// values are passed through so the cart store removes the line.
#[must_use]
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });

    match (magnitude, negative) {
        (0, _) => 1,
        (n, true) => -n,
        (n, false) => n,
    }
}
