//! Product identifiers derived from display names.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Cart key for a product.
///
/// The id is not stored with the product anywhere. It is recomputed from the
/// product's display name each time the product is added to a cart, so two
/// products rendered with the same name share one cart line, and renaming a
/// product gives it a new cart identity.
///
/// # Example
///
/// ```rust
/// # use cartwheel_core::ProductId;
/// let id = ProductId::from_name("Blue Mug");
/// assert_eq!(id.as_str(), "blue-mug");
///
/// // Whitespace runs collapse into a single hyphen.
/// assert_eq!(ProductId::from_name("Tea  \t Pot").as_str(), "tea-pot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap an existing id string (e.g. one posted back by the cart page).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a product's display name.
    ///
    /// The name is lowercased and every run of whitespace becomes one `-`.
    /// Leading and trailing whitespace is not trimmed.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut id = String::with_capacity(name.len());
        let mut in_whitespace = false;

        for c in name.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    id.push('-');
                }
                in_whitespace = true;
            } else {
                id.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }

        Self(id)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
