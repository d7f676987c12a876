//! Order pricing calculations.
//!
//! [`PricingBreakdown::compute`] is the single aggregation point: every
//! displayed or persisted total is derived from it, and the payment amount
//! sent to the processor must equal its `total` exactly.

use crate::cart::OptionSelection;
use crate::error::CommerceError;
use crate::ids::OptionCode;
use crate::money::{Currency, Money, TaxRate};
use serde::{Deserialize, Serialize};

/// Tax input for an order.
///
/// Callers must be explicit about whether they pass a precomputed amount or
/// a rate. A rate applies to `base + options` only — never to delivery or
/// setup — which is the usual jurisdiction rule for factory-built homes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TaxInput {
    /// Tax already computed by the caller.
    Amount(Money),
    /// Tax rate to apply to `base + options`.
    Rate(TaxRate),
}

/// Inputs to a pricing computation.
#[derive(Debug, Clone)]
pub struct PricingInputs<'a> {
    /// Base model price.
    pub base: Money,
    /// Selected options.
    pub selections: &'a [OptionSelection],
    /// Delivery fee from the accepted quote.
    pub delivery: Money,
    /// On-site setup fee.
    pub setup: Money,
    /// Tax amount or rate.
    pub tax: TaxInput,
    /// Discount adjustment, always <= 0.
    pub discount: Money,
}

/// Pricing for a single option selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionPricing {
    /// Option code.
    pub code: OptionCode,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Line total (unit_price * quantity).
    pub line_total: Money,
}

/// Complete pricing breakdown for an order.
///
/// A derived view, never the source of truth: it is recomputed wholesale
/// from its inputs and satisfies
/// `total == max(0, base + options + delivery + setup + tax + discounts)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    /// Base model price.
    pub base: Money,
    /// Options subtotal.
    pub options: Money,
    /// Delivery fee.
    pub delivery: Money,
    /// Setup fee.
    pub setup: Money,
    /// Tax amount.
    pub tax: Money,
    /// Discount adjustment (<= 0).
    pub discounts: Money,
    /// Final total, floored at zero.
    pub total: Money,
    /// Per-selection breakdown.
    pub lines: Vec<SelectionPricing>,
}

impl PricingBreakdown {
    /// Compute a breakdown from its inputs.
    ///
    /// Pure function: identical inputs always produce an identical
    /// breakdown. All arithmetic is checked integer math.
    pub fn compute(inputs: &PricingInputs<'_>) -> Result<Self, CommerceError> {
        let currency = inputs.base.currency;

        ensure_non_negative(&inputs.base, "base")?;
        ensure_currency(&inputs.delivery, currency)?;
        ensure_non_negative(&inputs.delivery, "delivery")?;
        ensure_currency(&inputs.setup, currency)?;
        ensure_non_negative(&inputs.setup, "setup")?;

        ensure_currency(&inputs.discount, currency)?;
        if inputs.discount.is_positive() {
            return Err(CommerceError::InvalidAmount {
                field: "discounts",
                amount_cents: inputs.discount.amount_cents,
            });
        }

        let mut lines = Vec::with_capacity(inputs.selections.len());
        let mut options = Money::zero(currency);
        for selection in inputs.selections {
            if selection.quantity < 1 {
                return Err(CommerceError::InvalidQuantity(selection.quantity));
            }
            ensure_currency(&selection.unit_price, currency)?;
            ensure_non_negative(&selection.unit_price, "options")?;

            let line_total = selection.line_total()?;
            options = options.try_add(&line_total).ok_or(CommerceError::Overflow)?;
            lines.push(SelectionPricing {
                code: selection.code.clone(),
                unit_price: selection.unit_price,
                quantity: selection.quantity,
                line_total,
            });
        }

        let tax = match inputs.tax {
            TaxInput::Amount(amount) => {
                ensure_currency(&amount, currency)?;
                ensure_non_negative(&amount, "tax")?;
                amount
            }
            TaxInput::Rate(rate) => {
                let taxable = inputs
                    .base
                    .try_add(&options)
                    .ok_or(CommerceError::Overflow)?;
                rate.apply(taxable)?
            }
        };

        let signed_total = inputs
            .base
            .try_add(&options)
            .and_then(|m| m.try_add(&inputs.delivery))
            .and_then(|m| m.try_add(&inputs.setup))
            .and_then(|m| m.try_add(&tax))
            .and_then(|m| m.try_add(&inputs.discount))
            .ok_or(CommerceError::Overflow)?;

        // Discounts can never drive the charge below zero.
        let total = Money::new(signed_total.amount_cents.max(0), currency);

        Ok(Self {
            base: inputs.base,
            options,
            delivery: inputs.delivery,
            setup: inputs.setup,
            tax,
            discounts: inputs.discount,
            total,
            lines,
        })
    }

    /// Check if any discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discounts.is_negative()
    }

    /// Amount saved through discounts, as a non-negative value.
    pub fn savings(&self) -> Money {
        self.discounts.abs()
    }
}

fn ensure_currency(amount: &Money, currency: Currency) -> Result<(), CommerceError> {
    if amount.currency != currency {
        return Err(CommerceError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: amount.currency.code().to_string(),
        });
    }
    Ok(())
}

fn ensure_non_negative(amount: &Money, field: &'static str) -> Result<(), CommerceError> {
    if amount.is_negative() {
        return Err(CommerceError::InvalidAmount {
            field,
            amount_cents: amount.amount_cents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn flooring(quantity: i64) -> OptionSelection {
        OptionSelection {
            code: OptionCode::new("flooring-oak"),
            name: "Upgraded Flooring".to_string(),
            unit_price: usd(120_000),
            quantity,
        }
    }

    fn base_inputs(selections: &[OptionSelection]) -> PricingInputs<'_> {
        PricingInputs {
            base: usd(5_000_000),
            selections,
            delivery: usd(250_000),
            setup: usd(80_000),
            tax: TaxInput::Amount(usd(0)),
            discount: usd(0),
        }
    }

    #[test]
    fn test_worked_example() {
        // $50,000 base + $1,200 flooring + $2,500 delivery + $800 setup
        let selections = [flooring(1)];
        let breakdown = PricingBreakdown::compute(&base_inputs(&selections)).unwrap();

        assert_eq!(breakdown.options.amount_cents, 120_000);
        assert_eq!(breakdown.total.amount_cents, 5_450_000);
    }

    #[test]
    fn test_worked_example_with_discount() {
        let selections = [flooring(1)];
        let mut inputs = base_inputs(&selections);
        inputs.discount = usd(-60_000);

        let breakdown = PricingBreakdown::compute(&inputs).unwrap();
        assert_eq!(breakdown.total.amount_cents, 5_390_000);
        assert!(breakdown.has_discount());
        assert_eq!(breakdown.savings().amount_cents, 60_000);
    }

    #[test]
    fn test_total_floors_at_zero() {
        let inputs = PricingInputs {
            base: usd(5_000_000),
            selections: &[],
            delivery: usd(0),
            setup: usd(0),
            tax: TaxInput::Amount(usd(0)),
            discount: usd(-10_000_000),
        };
        let breakdown = PricingBreakdown::compute(&inputs).unwrap();
        assert_eq!(breakdown.total.amount_cents, 0);
        assert_eq!(breakdown.discounts.amount_cents, -10_000_000);
    }

    #[test]
    fn test_options_sum() {
        let selections = [
            flooring(1),
            OptionSelection {
                code: OptionCode::new("window-extra"),
                name: "Extra Window".to_string(),
                unit_price: usd(65_000),
                quantity: 3,
            },
        ];
        let breakdown = PricingBreakdown::compute(&base_inputs(&selections)).unwrap();
        assert_eq!(breakdown.options.amount_cents, 120_000 + 3 * 65_000);
        assert_eq!(breakdown.lines.len(), 2);
        assert_eq!(breakdown.lines[1].line_total.amount_cents, 195_000);
    }

    #[test]
    fn test_quantity_delta_changes_options_by_unit_price() {
        let at = |quantity: i64| {
            let selections = [OptionSelection {
                code: OptionCode::new("window-extra"),
                name: "Extra Window".to_string(),
                unit_price: usd(65_000),
                quantity,
            }];
            PricingBreakdown::compute(&base_inputs(&selections))
                .unwrap()
                .options
                .amount_cents
        };
        assert_eq!(at(3) - at(2), 65_000);
        assert_eq!(at(5) - at(2), 3 * 65_000);
    }

    #[test]
    fn test_rate_applies_to_base_plus_options_only() {
        // 10% of (base + options), not of delivery or setup
        let selections = [flooring(1)];
        let mut inputs = base_inputs(&selections);
        inputs.tax = TaxInput::Rate(TaxRate::from_bps(1000));

        let breakdown = PricingBreakdown::compute(&inputs).unwrap();
        assert_eq!(breakdown.tax.amount_cents, (5_000_000 + 120_000) / 10);
    }

    #[test]
    fn test_idempotent() {
        let selections = [flooring(1)];
        let inputs = base_inputs(&selections);
        let a = PricingBreakdown::compute(&inputs).unwrap();
        let b = PricingBreakdown::compute(&inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_quantity_below_one() {
        let selections = [flooring(0)];
        assert!(matches!(
            PricingBreakdown::compute(&base_inputs(&selections)),
            Err(CommerceError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let mut inputs = base_inputs(&[]);
        inputs.delivery = usd(-1);
        assert!(matches!(
            PricingBreakdown::compute(&inputs),
            Err(CommerceError::InvalidAmount {
                field: "delivery",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_positive_discount() {
        let mut inputs = base_inputs(&[]);
        inputs.discount = usd(500);
        assert!(matches!(
            PricingBreakdown::compute(&inputs),
            Err(CommerceError::InvalidAmount {
                field: "discounts",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_currency_mismatch() {
        let mut inputs = base_inputs(&[]);
        inputs.setup = Money::new(80_000, Currency::CAD);
        assert!(matches!(
            PricingBreakdown::compute(&inputs),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }
}
