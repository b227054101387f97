//! Product value type.
//!
//! A [`Product`] is an immutable record validated at construction. It drives
//! actions (form fills, row lookups) but is never the source of an asserted
//! outcome: every verification re-reads the rendered surface.

use serde::{Deserialize, Serialize};

use crate::result::{VerdadError, VerdadResult};
use crate::text::Money;

/// An immutable product record.
///
/// `name` is the identity key: it must be a substring uniquely identifying
/// one rendered row among all current rows. Collisions are a caller error
/// and surface as a lookup failure at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    price: Money,
    quantity: u32,
}

impl Product {
    /// Create a validated product.
    ///
    /// # Errors
    ///
    /// Returns [`VerdadError::InvalidProduct`] if the name is blank or the
    /// price text is not a plain non-negative decimal with at most 2
    /// fraction digits.
    pub fn new(name: impl Into<String>, price: &str, quantity: u32) -> VerdadResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VerdadError::InvalidProduct {
                message: "name must not be blank".to_string(),
            });
        }
        let price = Money::parse(price).ok_or_else(|| VerdadError::InvalidProduct {
            message: format!("price {price:?} is not a plain decimal"),
        })?;
        Ok(Self {
            name,
            price,
            quantity,
        })
    }

    /// The display name (row identity key)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Initial stock quantity
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price as typed into the inventory form (no currency symbol)
    #[must_use]
    pub fn price_text(&self) -> String {
        self.price.plain()
    }

    /// Quantity as typed into the inventory form
    #[must_use]
    pub fn quantity_text(&self) -> String {
        self.quantity.to_string()
    }
}
