//! Money amounts using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] so that totals like `10 * 2 + 5` are exact,
//! but they are serialized as plain JSON numbers (`12.5`, not `"12.50"`) so
//! the persisted cart stays a simple array of objects.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Currency symbol used for every displayed amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Unit prices must stay below this many whole currency units.
pub const MAX_WHOLE_UNITS: i64 = 1_000_000_000;

/// Fractional digits kept on a unit price; further digits are rounded.
pub const MAX_SCALE: u32 = 4;

/// Errors that can occur when reading a price.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text contains no digits to read a number from.
    #[error("price text {0:?} contains no number")]
    NoNumber(String),
    /// The amount is negative or not below [`MAX_WHOLE_UNITS`].
    #[error("price {0:?} is out of range")]
    OutOfRange(String),
}

/// A non-negative money amount in the store currency.
///
/// Unit prices built through [`TryFrom`], [`Price::parse_display_text`] or
/// deserialization are below [`MAX_WHOLE_UNITS`] with at most [`MAX_SCALE`]
/// fractional digits. That keeps them within the exact range of the `f64`
/// they are persisted as, so a saved price reads back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount without range checks.
    ///
    /// Use [`TryFrom`] for amounts that come from outside the program.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Read a price from formatted text such as `"$12.50"` or `"USD 1,299.00"`.
    ///
    /// Every character other than an ASCII digit or `.` is dropped, then the
    /// longest leading number is read: `"1.2.3"` reads as `1.2`. A minus sign
    /// is dropped like any other symbol, so the result is never negative.
    /// Digits beyond [`MAX_SCALE`] decimal places are rounded.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NoNumber`] if no digits remain, and
    /// [`PriceError::OutOfRange`] if the amount is not below
    /// [`MAX_WHOLE_UNITS`].
    ///
    /// # Example
    ///
    /// ```rust
    /// # use cartwheel_core::Price;
    /// let price = Price::parse_display_text("$12.50").unwrap();
    /// assert_eq!(price, Price::from_cents(1250));
    /// assert!(Price::parse_display_text("Sold out").is_err());
    /// ```
    pub fn parse_display_text(text: &str) -> Result<Self, PriceError> {
        let mut whole = String::new();
        let mut fraction = String::new();
        let mut seen_point = false;

        for c in text.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
            match (c, seen_point) {
                ('.', false) => seen_point = true,
                ('.', true) => break,
                (digit, false) => whole.push(digit),
                (digit, true) => fraction.push(digit),
            }
        }

        if whole.is_empty() && fraction.is_empty() {
            return Err(PriceError::NoNumber(text.to_owned()));
        }

        let normalized = match (whole.is_empty(), fraction.is_empty()) {
            (_, true) => whole,
            (true, false) => format!("0.{fraction}"),
            (false, false) => format!("{whole}.{fraction}"),
        };

        Decimal::from_str(&normalized)
            .ok()
            .and_then(|amount| Self::try_from(amount).ok())
            .ok_or_else(|| PriceError::OutOfRange(text.to_owned()))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimals, e.g. `"$37.50"`.
    ///
    /// Halves round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{CURRENCY_SYMBOL}{rounded:.2}")
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount < Decimal::ZERO || amount >= Decimal::from(MAX_WHOLE_UNITS) {
            return Err(PriceError::OutOfRange(amount.to_string()));
        }
        Ok(Self(amount.round_dp_with_strategy(
            MAX_SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        )))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::try_from(amount).map_err(de::Error::custom)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Saturates at [`Decimal::MAX`].
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Saturates at [`Decimal::MAX`].
impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
