//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity below the minimum of one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the allowed cap.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// A money input that must be non-negative was negative (or a discount
    /// adjustment was positive).
    #[error("Invalid amount for {field}: {amount_cents} cents")]
    InvalidAmount {
        field: &'static str,
        amount_cents: i64,
    },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Mixed currencies in one calculation.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Option is not offered for the chosen model.
    #[error("Option not available for this model: {0}")]
    UnknownOption(String),

    /// No home model has been chosen yet.
    #[error("No home model chosen")]
    ModelNotChosen,

    /// Model exists but cannot currently be ordered.
    #[error("Model not orderable: {0}")]
    ModelNotOrderable(String),

    /// ZIP code is empty or malformed.
    #[error("Invalid ZIP code: {0:?}")]
    InvalidZip(String),

    /// Distance is negative or not a finite number.
    #[error("Invalid distance: {0} miles")]
    InvalidDistance(f64),

    /// Rate card has inconsistent bounds or rates.
    #[error("Invalid rate card: {0}")]
    InvalidRateCard(&'static str),

    /// Discount cannot be applied to this cart.
    #[error("Discount not applicable: {0}")]
    InvalidDiscount(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout is missing required data.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
