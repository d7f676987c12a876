//! The configurator cart.

use crate::cart::{AppliedDiscount, Discount, OptionSelection, PricingBreakdown, PricingInputs, TaxInput};
use crate::catalog::{HomeModel, ModelOption};
use crate::delivery::DeliveryQuote;
use crate::error::CommerceError;
use crate::ids::{CartId, ModelId, OptionCode, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Cart-level cap on a single option's quantity.
pub const MAX_QUANTITY_PER_OPTION: i64 = 99;

/// A buyer's in-progress home configuration.
///
/// The cart exclusively owns its selection set and its current pricing
/// breakdown. [`Cart::reprice`] replaces the breakdown wholesale — it is
/// never patched in place, so a failed recomputation leaves the previous
/// breakdown untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Session ID for anonymous carts.
    pub session_id: String,
    /// User ID for authenticated carts.
    pub user_id: Option<UserId>,
    /// Chosen model, if any.
    pub model_id: Option<ModelId>,
    /// Model name (denormalized for display).
    pub model_name: Option<String>,
    /// Model SKU (denormalized).
    pub model_sku: Option<String>,
    /// Base price of the chosen model.
    pub base_price: Money,
    /// Setup fee of the chosen model.
    pub setup_fee: Money,
    /// Option codes the chosen model offers.
    pub offered_codes: Vec<OptionCode>,
    /// Selected options.
    pub selections: Vec<OptionSelection>,
    /// Applied discounts.
    pub discounts: Vec<AppliedDiscount>,
    /// Accepted delivery quote, if any.
    pub delivery: Option<DeliveryQuote>,
    /// Current pricing breakdown, if computed.
    pub pricing: Option<PricingBreakdown>,
    /// Cart currency.
    pub currency: Currency,
    /// Customer note.
    pub note: Option<String>,
    /// Additional metadata.
    pub metadata: serde_json::Value,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new cart for a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            session_id: session_id.into(),
            user_id: None,
            model_id: None,
            model_name: None,
            model_sku: None,
            base_price: Money::zero(Currency::USD),
            setup_fee: Money::zero(Currency::USD),
            offered_codes: Vec::new(),
            selections: Vec::new(),
            discounts: Vec::new(),
            delivery: None,
            pricing: None,
            currency: Currency::USD,
            note: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a cart for an authenticated user.
    pub fn for_user(user_id: UserId, session_id: impl Into<String>) -> Self {
        let mut cart = Self::new(session_id);
        cart.user_id = Some(user_id);
        cart
    }

    /// Choose (or switch) the home model.
    ///
    /// Switching models resets the configuration: selections, delivery
    /// quote, and pricing all start over.
    pub fn choose_model(&mut self, model: &HomeModel) -> Result<(), CommerceError> {
        if !model.is_orderable() {
            return Err(CommerceError::ModelNotOrderable(model.sku.clone()));
        }
        self.model_id = Some(model.id.clone());
        self.model_name = Some(model.name.clone());
        self.model_sku = Some(model.sku.clone());
        self.base_price = model.base_price;
        self.setup_fee = model.setup_fee;
        self.offered_codes = model.option_codes.clone();
        self.currency = model.base_price.currency;
        self.selections.clear();
        self.discounts.clear();
        self.delivery = None;
        self.pricing = None;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Select an option at a quantity.
    ///
    /// Selecting an already-selected option replaces its quantity. Fails
    /// when no model is chosen, the model does not offer the option, or
    /// the quantity is out of range.
    pub fn select_option(
        &mut self,
        option: &ModelOption,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if self.model_id.is_none() {
            return Err(CommerceError::ModelNotChosen);
        }
        if !self.offered_codes.contains(&option.code) {
            return Err(CommerceError::UnknownOption(option.code.to_string()));
        }
        if option.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: option.unit_price.currency.code().to_string(),
            });
        }

        let selection = option.select(quantity)?;
        if let Some(existing) = self.selections.iter_mut().find(|s| s.code == option.code) {
            *existing = selection;
        } else {
            self.selections.push(selection);
        }
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Update a selection's quantity.
    ///
    /// A quantity of zero or less removes the selection.
    pub fn set_quantity(&mut self, code: &OptionCode, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.deselect(code));
        }
        if quantity > MAX_QUANTITY_PER_OPTION {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_OPTION,
            ));
        }

        if let Some(selection) = self.selections.iter_mut().find(|s| &s.code == code) {
            selection.quantity = quantity;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a selection.
    pub fn deselect(&mut self, code: &OptionCode) -> bool {
        let len_before = self.selections.len();
        self.selections.retain(|s| &s.code != code);
        let removed = self.selections.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all selections and discounts.
    pub fn clear(&mut self) {
        self.selections.clear();
        self.discounts.clear();
        self.pricing = None;
        self.updated_at = current_timestamp();
    }

    /// Apply a promo code to the cart.
    ///
    /// The amount off is calculated against `base + options`; applying a
    /// code that is already on the cart replaces the earlier application.
    pub fn apply_discount(&mut self, discount: &Discount) -> Result<(), CommerceError> {
        let subtotal = self.subtotal()?;
        let applied = discount.apply_to(&subtotal)?;
        self.discounts.retain(|d| d.code != applied.code);
        self.discounts.push(applied);
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Remove a discount by code.
    pub fn remove_discount(&mut self, code: &str) -> bool {
        let len_before = self.discounts.len();
        self.discounts.retain(|d| d.code != code);
        let removed = self.discounts.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Fold an accepted delivery quote into the cart.
    pub fn set_delivery_quote(&mut self, quote: DeliveryQuote) -> Result<(), CommerceError> {
        if quote.fee.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: quote.fee.currency.code().to_string(),
            });
        }
        self.delivery = Some(quote);
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Drop the delivery quote (e.g., destination changed).
    pub fn clear_delivery(&mut self) {
        self.delivery = None;
        self.updated_at = current_timestamp();
    }

    /// Options subtotal: sum of all selection line totals.
    pub fn options_subtotal(&self) -> Result<Money, CommerceError> {
        let mut sum = Money::zero(self.currency);
        for selection in &self.selections {
            let line = selection.line_total()?;
            sum = sum.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(sum)
    }

    /// Subtotal: base price plus options.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.base_price
            .try_add(&self.options_subtotal()?)
            .ok_or(CommerceError::Overflow)
    }

    /// Total discount adjustment, as a value <= 0.
    pub fn signed_discount_total(&self) -> Result<Money, CommerceError> {
        let off = Money::try_sum(self.discounts.iter().map(|d| &d.amount), self.currency)
            .ok_or(CommerceError::Overflow)?;
        Ok(off.negate())
    }

    /// Recompute the pricing breakdown and replace the stored one.
    ///
    /// On error the previously computed breakdown is left untouched.
    pub fn reprice(&mut self, tax: TaxInput) -> Result<&PricingBreakdown, CommerceError> {
        if self.model_id.is_none() {
            return Err(CommerceError::ModelNotChosen);
        }

        let delivery_fee = self
            .delivery
            .as_ref()
            .map(|q| q.fee)
            .unwrap_or_else(|| Money::zero(self.currency));
        let discount = self.signed_discount_total()?;

        let breakdown = PricingBreakdown::compute(&PricingInputs {
            base: self.base_price,
            selections: &self.selections,
            delivery: delivery_fee,
            setup: self.setup_fee,
            tax,
            discount,
        })?;

        self.updated_at = current_timestamp();
        Ok(self.pricing.insert(breakdown))
    }

    /// Get the quantity selected for an option (0 if not selected).
    pub fn quantity_of(&self, code: &OptionCode) -> i64 {
        self.selections
            .iter()
            .find(|s| &s.code == code)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    /// Number of distinct selected options.
    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }

    /// Check if a model has been chosen.
    pub fn is_configured(&self) -> bool {
        self.model_id.is_some()
    }

    /// Check if the cart has no selections.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Attach the cart to an authenticated user.
    pub fn set_user(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new("anonymous")
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
    use crate::catalog::OptionCategory;
    use crate::money::TaxRate;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn sitka() -> HomeModel {
        let mut model = HomeModel::new("HAUS-S1", "Sitka", "sitka", usd(5_000_000))
            .with_setup_fee(usd(80_000))
            .with_floor_plan(399, 1, 1);
        model.add_option(OptionCode::new("flooring-oak"));
        model.add_option(OptionCode::new("window-extra"));
        model
    }

    fn flooring() -> ModelOption {
        ModelOption::new(
            "flooring-oak",
            "Upgraded Flooring",
            OptionCategory::Interior,
            usd(120_000),
        )
    }

    fn windows() -> ModelOption {
        ModelOption::new(
            "window-extra",
            "Extra Window",
            OptionCategory::Structural,
            usd(65_000),
        )
        .with_max_quantity(6)
    }

    fn quote(fee_cents: i64) -> DeliveryQuote {
        DeliveryQuote {
            fee: usd(fee_cents),
            distance_miles: 480.0,
            eta_weeks_min: 2,
            eta_weeks_max: 4,
        }
    }

    fn configured_cart() -> Cart {
        let mut cart = Cart::new("session-1");
        cart.choose_model(&sitka()).unwrap();
        cart
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new("session-1");
        assert!(cart.is_empty());
        assert!(!cart.is_configured());
    }

    #[test]
    fn test_select_requires_model() {
        let mut cart = Cart::new("session-1");
        assert!(matches!(
            cart.select_option(&flooring(), 1),
            Err(CommerceError::ModelNotChosen)
        ));
    }

    #[test]
    fn test_select_rejects_unoffered_option() {
        let mut cart = configured_cart();
        let solar = ModelOption::new(
            "solar-roof",
            "Solar Roof",
            OptionCategory::Utility,
            usd(900_000),
        );
        assert!(matches!(
            cart.select_option(&solar, 1),
            Err(CommerceError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_reselect_replaces_quantity() {
        let mut cart = configured_cart();
        cart.select_option(&windows(), 2).unwrap();
        cart.select_option(&windows(), 4).unwrap();

        assert_eq!(cart.selection_count(), 1);
        assert_eq!(cart.quantity_of(&OptionCode::new("window-extra")), 4);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = configured_cart();
        cart.select_option(&flooring(), 1).unwrap();

        let removed = cart
            .set_quantity(&OptionCode::new("flooring-oak"), 0)
            .unwrap();
        assert!(removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_switching_model_resets_configuration() {
        let mut cart = configured_cart();
        cart.select_option(&flooring(), 1).unwrap();
        cart.set_delivery_quote(quote(250_000)).unwrap();
        cart.reprice(TaxInput::Amount(usd(0))).unwrap();

        let mut other = sitka();
        other.sku = "HAUS-J1".to_string();
        other.name = "Juniper".to_string();
        cart.choose_model(&other).unwrap();

        assert!(cart.is_empty());
        assert!(cart.delivery.is_none());
        assert!(cart.pricing.is_none());
    }

    #[test]
    fn test_reprice_worked_example() {
        let mut cart = configured_cart();
        cart.select_option(&flooring(), 1).unwrap();
        cart.set_delivery_quote(quote(250_000)).unwrap();

        let pricing = cart.reprice(TaxInput::Amount(usd(0))).unwrap();
        assert_eq!(pricing.total.amount_cents, 5_450_000);
    }

    #[test]
    fn test_reprice_with_discount() {
        let mut cart = configured_cart();
        cart.select_option(&flooring(), 1).unwrap();
        cart.set_delivery_quote(quote(250_000)).unwrap();
        cart.apply_discount(&Discount::fixed("SPRING", "$600 Off", usd(60_000)))
            .unwrap();

        let pricing = cart.reprice(TaxInput::Amount(usd(0))).unwrap();
        assert_eq!(pricing.discounts.amount_cents, -60_000);
        assert_eq!(pricing.total.amount_cents, 5_390_000);
    }

    #[test]
    fn test_failed_reprice_keeps_previous_breakdown() {
        let mut cart = configured_cart();
        cart.select_option(&flooring(), 1).unwrap();
        cart.reprice(TaxInput::Amount(usd(0))).unwrap();
        let before = cart.pricing.clone().unwrap();

        // Corrupt a selection behind the validation, then reprice.
        cart.selections[0].quantity = 0;
        let err = cart.reprice(TaxInput::Amount(usd(0)));
        assert!(matches!(err, Err(CommerceError::InvalidQuantity(0))));
        assert_eq!(cart.pricing.as_ref().unwrap(), &before);
    }

    #[test]
    fn test_delivery_quote_currency_checked() {
        let mut cart = configured_cart();
        let mut q = quote(250_000);
        q.fee = Money::new(250_000, Currency::CAD);
        assert!(matches!(
            cart.set_delivery_quote(q),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }
}
