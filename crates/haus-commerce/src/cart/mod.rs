//! Cart types: option selections, discounts, pricing.

#[allow(clippy::module_inception)]
mod cart;
mod discount;
mod pricing;
mod selection;

pub use cart::{Cart, MAX_QUANTITY_PER_OPTION};
pub use discount::{AppliedDiscount, Discount, DiscountValue};
pub use pricing::{PricingBreakdown, PricingInputs, SelectionPricing, TaxInput};
pub use selection::OptionSelection;
