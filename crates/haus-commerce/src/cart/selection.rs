//! Option selection types.

use crate::error::CommerceError;
use crate::ids::OptionCode;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A configurator option selected into a cart or order.
///
/// The code is unique within one cart: selecting the same option again
/// replaces the quantity rather than adding a second line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionSelection {
    /// Option code (unique within the cart).
    pub code: OptionCode,
    /// Option name (denormalized for display).
    pub name: String,
    /// Price per unit at selection time.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl OptionSelection {
    /// Line total: `unit_price * quantity`, checked.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
