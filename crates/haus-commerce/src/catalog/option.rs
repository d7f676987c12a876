//! Configurator option types.

use crate::cart::OptionSelection;
use crate::error::CommerceError;
use crate::ids::OptionCode;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Category of a configurator option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionCategory {
    /// Interior finish (flooring, cabinetry, paint).
    Interior,
    /// Exterior finish (siding, roofing, deck).
    Exterior,
    /// Appliance package.
    Appliance,
    /// Utility hookups (solar, off-grid water, propane).
    Utility,
    /// Structural change (loft, dormer, extra window).
    Structural,
}

impl OptionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionCategory::Interior => "interior",
            OptionCategory::Exterior => "exterior",
            OptionCategory::Appliance => "appliance",
            OptionCategory::Utility => "utility",
            OptionCategory::Structural => "structural",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "interior" => Some(OptionCategory::Interior),
            "exterior" => Some(OptionCategory::Exterior),
            "appliance" => Some(OptionCategory::Appliance),
            "utility" => Some(OptionCategory::Utility),
            "structural" => Some(OptionCategory::Structural),
            _ => None,
        }
    }
}

/// A configurator option offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelOption {
    /// Option code (unique in the catalog).
    pub code: OptionCode,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Option category.
    pub category: OptionCategory,
    /// Price per unit.
    pub unit_price: Money,
    /// Maximum quantity per order (1 for binary options).
    pub max_quantity: i64,
}

impl ModelOption {
    /// Create a new option. Defaults to a binary (quantity 1) option.
    pub fn new(
        code: impl Into<OptionCode>,
        name: impl Into<String>,
        category: OptionCategory,
        unit_price: Money,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            category,
            unit_price,
            max_quantity: 1,
        }
    }

    /// Allow the option to be selected more than once (e.g., extra windows).
    pub fn with_max_quantity(mut self, max: i64) -> Self {
        self.max_quantity = max;
        self
    }

    /// Check if the option can be selected more than once.
    pub fn is_multi(&self) -> bool {
        self.max_quantity > 1
    }

    /// Build a selection of this option at the given quantity.
    ///
    /// Fails with `InvalidQuantity` below 1 and `QuantityExceedsLimit`
    /// above the per-option cap.
    pub fn select(&self, quantity: i64) -> Result<OptionSelection, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > self.max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                self.max_quantity,
            ));
        }
        Ok(OptionSelection {
            code: self.code.clone(),
            name: self.name.clone(),
            unit_price: self.unit_price,
            quantity,
        })
    }
}
