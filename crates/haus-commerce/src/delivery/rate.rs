//! Delivery rate card.

use crate::delivery::DeliveryQuote;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Upper bound on a believable road distance, in miles.
const MAX_DISTANCE_MILES: f64 = 15_000.0;

/// Pricing parameters for delivery quoting.
///
/// The fee is a deterministic function of distance:
/// `clamp(base_fee + per_mile * ceil(distance), min_fee, max_fee)`.
/// Distance is billed per started mile so the money math stays in
/// integers. The ETA window assumes a fixed transport speed:
/// `ceil(miles / fast_miles_per_week)` weeks at best, plus a buffer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateCard {
    /// Flat fee charged on every delivery.
    pub base_fee: Money,
    /// Fee per started mile.
    pub per_mile: Money,
    /// Lower clamp on the total fee.
    pub min_fee: Money,
    /// Upper clamp on the total fee.
    pub max_fee: Money,
    /// Miles covered per week at the fastest schedule.
    pub fast_miles_per_week: u32,
    /// Weeks added on top of the fastest schedule.
    pub buffer_weeks: u32,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            base_fee: Money::new(120_000, Currency::USD),
            per_mile: Money::new(450, Currency::USD),
            min_fee: Money::new(150_000, Currency::USD),
            max_fee: Money::new(1_200_000, Currency::USD),
            fast_miles_per_week: 400,
            buffer_weeks: 2,
        }
    }
}

impl RateCard {
    /// Check the card for internal consistency.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let currency = self.base_fee.currency;
        for fee in [&self.per_mile, &self.min_fee, &self.max_fee] {
            if fee.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: fee.currency.code().to_string(),
                });
            }
        }
        if self.base_fee.is_negative() || self.per_mile.is_negative() || self.min_fee.is_negative()
        {
            return Err(CommerceError::InvalidRateCard("negative fee"));
        }
        if self.min_fee.amount_cents > self.max_fee.amount_cents {
            return Err(CommerceError::InvalidRateCard("min_fee above max_fee"));
        }
        if self.fast_miles_per_week == 0 {
            return Err(CommerceError::InvalidRateCard("fast_miles_per_week is zero"));
        }
        Ok(())
    }

    /// Quote a delivery at the given distance.
    ///
    /// Deterministic and monotonically non-decreasing in distance: the
    /// same distance always yields the same quote, and a longer haul is
    /// never cheaper.
    pub fn quote(&self, distance_miles: f64) -> Result<DeliveryQuote, CommerceError> {
        self.validate()?;
        if !distance_miles.is_finite() || distance_miles < 0.0 || distance_miles > MAX_DISTANCE_MILES
        {
            return Err(CommerceError::InvalidDistance(distance_miles));
        }

        let billable_miles = distance_miles.ceil() as i64;
        let mileage = self
            .per_mile
            .try_multiply(billable_miles)
            .ok_or(CommerceError::Overflow)?;
        let fee = self
            .base_fee
            .try_add(&mileage)
            .ok_or(CommerceError::Overflow)?
            .clamp(self.min_fee, self.max_fee);

        let fast = self.fast_miles_per_week as i64;
        let eta_weeks_min = ((billable_miles + fast - 1) / fast) as u32;
        let eta_weeks_max = eta_weeks_min + self.buffer_weeks;

        Ok(DeliveryQuote {
            fee,
            distance_miles,
            eta_weeks_min,
            eta_weeks_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_quote_is_deterministic() {
        let card = RateCard::default();
        let a = card.quote(480.0).unwrap();
        let b = card.quote(480.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fee_formula() {
        let card = RateCard::default();
        // 480 miles: $1,200 base + 480 * $4.50 = $3,360
        let quote = card.quote(480.0).unwrap();
        assert_eq!(quote.fee.amount_cents, 120_000 + 480 * 450);
    }

    #[test]
    fn test_partial_miles_bill_as_whole() {
        let card = RateCard::default();
        assert_eq!(
            card.quote(480.2).unwrap().fee,
            card.quote(481.0).unwrap().fee
        );
    }

    #[test]
    fn test_fee_monotone_in_distance() {
        let card = RateCard::default();
        let mut last = card.quote(0.0).unwrap().fee.amount_cents;
        for miles in (0..3000).step_by(25) {
            let fee = card.quote(miles as f64).unwrap().fee.amount_cents;
            assert!(fee >= last, "fee decreased at {} miles", miles);
            last = fee;
        }
    }

    #[test]
    fn test_fee_clamped() {
        let card = RateCard::default();
        // Next door still pays the minimum
        assert_eq!(card.quote(0.0).unwrap().fee.amount_cents, 150_000);
        // A cross-country haul caps out
        assert_eq!(card.quote(3_000.0).unwrap().fee.amount_cents, 1_200_000);
    }

    #[test]
    fn test_eta_window() {
        let card = RateCard::default();
        // 480 miles at 400 mi/week: 2 weeks minimum, +2 buffer
        let quote = card.quote(480.0).unwrap();
        assert_eq!(quote.eta_weeks_min, 2);
        assert_eq!(quote.eta_weeks_max, 4);

        // 400 miles exactly: 1 week minimum
        assert_eq!(card.quote(400.0).unwrap().eta_weeks_min, 1);
    }

    #[test]
    fn test_rejects_bad_distance() {
        let card = RateCard::default();
        assert!(matches!(
            card.quote(-1.0),
            Err(CommerceError::InvalidDistance(_))
        ));
        assert!(card.quote(f64::NAN).is_err());
        assert!(card.quote(f64::INFINITY).is_err());
        assert!(card.quote(MAX_DISTANCE_MILES + 1.0).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_clamp() {
        let card = RateCard {
            min_fee: usd(500_000),
            max_fee: usd(100_000),
            ..RateCard::default()
        };
        assert!(matches!(
            card.validate(),
            Err(CommerceError::InvalidRateCard(_))
        ));
    }
}
