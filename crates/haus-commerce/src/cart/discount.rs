//! Discount and promo-code types.

use crate::error::CommerceError;
use crate::ids::DiscountId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Value of a discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DiscountValue {
    /// Percentage off in basis points (1000 = 10%).
    PercentBps(u32),
    /// Fixed amount off.
    Fixed(Money),
}

impl DiscountValue {
    /// Calculate the amount off for a given subtotal, capped at the
    /// subtotal so a discount can never exceed what it applies to.
    pub fn amount_off(&self, subtotal: &Money) -> Money {
        match self {
            DiscountValue::PercentBps(bps) => {
                let off = (subtotal.amount_cents as i128 * *bps as i128 + 5_000) / 10_000;
                Money::new(off as i64, subtotal.currency)
            }
            DiscountValue::Fixed(amount) => {
                if amount.amount_cents > subtotal.amount_cents {
                    *subtotal
                } else {
                    Money::new(amount.amount_cents, subtotal.currency)
                }
            }
        }
    }
}

/// A discount/promo-code definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    /// Unique discount identifier.
    pub id: DiscountId,
    /// Promo code (e.g., "SPRING500").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Value of the discount.
    pub value: DiscountValue,
    /// Minimum subtotal for the discount to apply.
    pub min_subtotal: Option<Money>,
    /// Start date (Unix timestamp).
    pub starts_at: Option<i64>,
    /// End date (Unix timestamp).
    pub ends_at: Option<i64>,
    /// Maximum number of uses (None = unlimited).
    pub usage_limit: Option<i64>,
    /// Current usage count.
    pub usage_count: i64,
    /// Whether the discount is active.
    pub active: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Discount {
    /// Create a new percentage discount.
    pub fn percent(code: impl Into<String>, name: impl Into<String>, bps: u32) -> Self {
        Self::with_value(code, name, DiscountValue::PercentBps(bps))
    }

    /// Create a new fixed-amount discount.
    pub fn fixed(code: impl Into<String>, name: impl Into<String>, amount: Money) -> Self {
        Self::with_value(code, name, DiscountValue::Fixed(amount))
    }

    fn with_value(code: impl Into<String>, name: impl Into<String>, value: DiscountValue) -> Self {
        let now = current_timestamp();
        Self {
            id: DiscountId::generate(),
            code: code.into(),
            name: name.into(),
            description: None,
            value,
            min_subtotal: None,
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            usage_count: 0,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Require a minimum subtotal.
    pub fn with_min_subtotal(mut self, amount: Money) -> Self {
        self.min_subtotal = Some(amount);
        self
    }

    /// Limit the total number of uses.
    pub fn with_usage_limit(mut self, limit: i64) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Set an expiration date.
    pub fn expires_at(mut self, timestamp: i64) -> Self {
        self.ends_at = Some(timestamp);
        self
    }

    /// Check if the discount is currently valid (time and usage based).
    pub fn is_valid(&self) -> bool {
        if !self.active {
            return false;
        }

        let now = current_timestamp();

        if let Some(starts) = self.starts_at {
            if now < starts {
                return false;
            }
        }

        if let Some(ends) = self.ends_at {
            if now > ends {
                return false;
            }
        }

        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                return false;
            }
        }

        true
    }

    /// Check the discount against a cart subtotal, returning the applied
    /// form on success.
    pub fn apply_to(&self, subtotal: &Money) -> Result<AppliedDiscount, CommerceError> {
        if !self.is_valid() {
            return Err(CommerceError::InvalidDiscount(format!(
                "code {} is not currently valid",
                self.code
            )));
        }
        if let Some(min) = self.min_subtotal {
            if subtotal.amount_cents < min.amount_cents {
                return Err(CommerceError::InvalidDiscount(format!(
                    "code {} requires a subtotal of at least {}",
                    self.code, min
                )));
            }
        }
        Ok(AppliedDiscount::from_discount(
            self,
            self.value.amount_off(subtotal),
        ))
    }

    /// Increment the usage count.
    pub fn record_usage(&mut self) {
        self.usage_count += 1;
        self.updated_at = current_timestamp();
    }
}

/// A discount that has been applied to a cart.
///
/// `amount` is the non-negative amount off; the pricing breakdown carries
/// it as a negative adjustment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    /// The discount ID.
    pub discount_id: DiscountId,
    /// The promo code used.
    pub code: String,
    /// Description for display.
    pub description: String,
    /// Amount off (>= 0).
    pub amount: Money,
}

impl AppliedDiscount {
    /// Create from a discount and calculated amount off.
    pub fn from_discount(discount: &Discount, amount: Money) -> Self {
        Self {
            discount_id: discount.id.clone(),
            code: discount.code.clone(),
            description: discount.name.clone(),
            amount,
        }
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

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_percent_discount() {
        let discount = Discount::percent("SAVE10", "10% Off", 1000);
        assert_eq!(discount.value.amount_off(&usd(10_000)).amount_cents, 1_000);
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let discount = Discount::fixed("SAVE100", "$100 Off", usd(10_000));
        assert_eq!(discount.value.amount_off(&usd(5_000)).amount_cents, 5_000);
        assert_eq!(discount.value.amount_off(&usd(50_000)).amount_cents, 10_000);
    }

    #[test]
    fn test_apply_to_respects_minimum() {
        let discount =
            Discount::fixed("SPRING500", "$500 Off", usd(50_000)).with_min_subtotal(usd(1_000_000));

        assert!(discount.apply_to(&usd(500_000)).is_err());

        let applied = discount.apply_to(&usd(2_000_000)).unwrap();
        assert_eq!(applied.amount.amount_cents, 50_000);
        assert_eq!(applied.code, "SPRING500");
    }

    #[test]
    fn test_inactive_discount_rejected() {
        let mut discount = Discount::percent("TEST", "Test", 1000);
        discount.active = false;
        assert!(matches!(
            discount.apply_to(&usd(100_000)),
            Err(CommerceError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn test_usage_limit() {
        let mut discount = Discount::percent("TEST", "Test", 1000).with_usage_limit(2);
        assert!(discount.is_valid());
        discount.record_usage();
        discount.record_usage();
        assert!(!discount.is_valid());
    }
}
