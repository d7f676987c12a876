//! Domain types and pricing logic for the Haus direct-to-consumer store.
//!
//! This crate is the pure core of the Haus platform — no I/O, no clocks
//! beyond timestamping, no network. It provides:
//!
//! - **Catalog**: home models and configurator options
//! - **Cart**: option selections, discounts, the pricing breakdown
//! - **Delivery**: delivery quotes and the rate-card fee math
//! - **Checkout**: addresses, the checkout step machine, orders
//!
//! # Example
//!
//! ```rust,ignore
//! use haus_commerce::prelude::*;
//!
//! let model = HomeModel::new("HAUS-S1", "Sitka", "sitka", Money::new(5_000_000, Currency::USD));
//! let flooring = ModelOption::new(
//!     "flooring-oak",
//!     "Upgraded Flooring",
//!     OptionCategory::Interior,
//!     Money::new(120_000, Currency::USD),
//! );
//!
//! let mut cart = Cart::new("session-1");
//! cart.choose_model(&model);
//! cart.select_option(&flooring, 1)?;
//!
//! let pricing = cart.reprice(TaxInput::Rate(TaxRate::zero()))?;
//! println!("Total: {}", pricing.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod delivery;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, TaxRate};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, TaxRate};

    // Catalog
    pub use crate::catalog::{HomeModel, ModelOption, ModelStatus, OptionCategory};

    // Cart
    pub use crate::cart::{
        AppliedDiscount, Cart, Discount, DiscountValue, OptionSelection, PricingBreakdown,
        PricingInputs, SelectionPricing, TaxInput,
    };

    // Delivery
    pub use crate::delivery::{DeliveryQuote, RateCard, ZipCode};

    // Checkout
    pub use crate::checkout::{
        Address, AgreementStatus, CheckoutFlow, CheckoutStep, Order, OrderStatus, PaymentStatus,
        Reconciliation,
    };
}
