//! Home model types.

use crate::ids::{ModelId, OptionCode};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Model visibility in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelStatus {
    /// Model is in draft mode, not visible to buyers.
    Draft,
    /// Model is active and orderable.
    #[default]
    Active,
    /// Model is retired, not orderable but data preserved.
    Retired,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Draft => "draft",
            ModelStatus::Active => "active",
            ModelStatus::Retired => "retired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ModelStatus::Draft),
            "active" => Some(ModelStatus::Active),
            "retired" => Some(ModelStatus::Retired),
            _ => None,
        }
    }
}

/// A home model in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeModel {
    /// Unique model identifier.
    pub id: ModelId,
    /// Stock keeping unit (unique).
    pub sku: String,
    /// Model name (e.g., "Sitka").
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Full description (may contain HTML/markdown).
    pub description: Option<String>,
    /// Base price before options.
    pub base_price: Money,
    /// On-site setup and installation fee.
    pub setup_fee: Money,
    /// Interior square footage.
    pub square_feet: u32,
    /// Number of bedrooms (a loft counts as one).
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Model visibility status.
    pub status: ModelStatus,
    /// Option codes offered for this model.
    pub option_codes: Vec<OptionCode>,
    /// Additional metadata as JSON.
    pub metadata: serde_json::Value,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl HomeModel {
    /// Create a new model.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        base_price: Money,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: ModelId::generate(),
            sku: sku.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            base_price,
            setup_fee: Money::zero(base_price.currency),
            square_feet: 0,
            bedrooms: 0,
            bathrooms: 0,
            status: ModelStatus::Active,
            option_codes: Vec::new(),
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the setup fee.
    pub fn with_setup_fee(mut self, fee: Money) -> Self {
        self.setup_fee = fee;
        self
    }

    /// Set the floor-plan facts.
    pub fn with_floor_plan(mut self, square_feet: u32, bedrooms: u8, bathrooms: u8) -> Self {
        self.square_feet = square_feet;
        self.bedrooms = bedrooms;
        self.bathrooms = bathrooms;
        self
    }

    /// Offer an option for this model.
    pub fn add_option(&mut self, code: OptionCode) {
        if !self.option_codes.contains(&code) {
            self.option_codes.push(code);
            self.updated_at = current_timestamp();
        }
    }

    /// Check whether an option is offered for this model.
    pub fn supports_option(&self, code: &OptionCode) -> bool {
        self.option_codes.contains(code)
    }

    /// Check if the model can currently be ordered.
    pub fn is_orderable(&self) -> bool {
        self.status == ModelStatus::Active
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_model_creation() {
        let model = HomeModel::new(
            "HAUS-S1",
            "Sitka",
            "sitka",
            Money::new(5_000_000, Currency::USD),
        )
        .with_floor_plan(399, 1, 1);

        assert_eq!(model.name, "Sitka");
        assert_eq!(model.square_feet, 399);
        assert!(model.is_orderable());
    }

    #[test]
    fn test_model_options() {
        let mut model = HomeModel::new(
            "HAUS-S1",
            "Sitka",
            "sitka",
            Money::new(5_000_000, Currency::USD),
        );
        let code = OptionCode::new("flooring-oak");

        assert!(!model.supports_option(&code));
        model.add_option(code.clone());
        model.add_option(code.clone());
        assert!(model.supports_option(&code));
        assert_eq!(model.option_codes.len(), 1);
    }

    #[test]
    fn test_retired_model_not_orderable() {
        let mut model = HomeModel::new(
            "HAUS-S1",
            "Sitka",
            "sitka",
            Money::new(5_000_000, Currency::USD),
        );
        model.status = ModelStatus::Retired;
        assert!(!model.is_orderable());
    }
}
