//! Checkout flow state machine.

use crate::checkout::Address;
use crate::delivery::DeliveryQuote;
use crate::error::CommerceError;
use crate::ids::{CartId, CheckoutId};
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Model and option configuration.
    Configure,
    /// Delivery destination and quote.
    Delivery,
    /// Order review.
    Review,
    /// Purchase agreement signing.
    Agreement,
    /// Deposit payment.
    Payment,
    /// Checkout complete.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Configure => "configure",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Review => "review",
            CheckoutStep::Agreement => "agreement",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Configure => "Configure",
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Review => "Review",
            CheckoutStep::Agreement => "Agreement",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Configure => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Agreement => 4,
            CheckoutStep::Payment => 5,
            CheckoutStep::Complete => 6,
        }
    }
}

/// Checkout flow state.
///
/// Advancement is guarded: the buyer cannot review without a serviceable
/// delivery quote and cannot pay before the purchase agreement is signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Unique checkout identifier.
    pub id: CheckoutId,
    /// Associated cart ID.
    pub cart_id: CartId,
    /// Current step.
    pub step: CheckoutStep,
    /// Completed steps.
    pub completed_steps: Vec<CheckoutStep>,
    /// Customer email.
    pub email: Option<String>,
    /// Delivery site address.
    pub delivery_address: Option<Address>,
    /// Accepted delivery quote.
    pub quote: Option<DeliveryQuote>,
    /// Whether the purchase agreement has been signed.
    pub agreement_signed: bool,
    /// Payment method identifier/token.
    pub payment_token: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Unix timestamp when the checkout expires.
    pub expires_at: i64,
}

impl CheckoutFlow {
    /// Create a new checkout flow.
    pub fn new(cart_id: CartId) -> Self {
        let now = current_timestamp();
        Self {
            id: CheckoutId::generate(),
            cart_id,
            step: CheckoutStep::Configure,
            completed_steps: Vec::new(),
            email: None,
            delivery_address: None,
            quote: None,
            agreement_signed: false,
            payment_token: None,
            created_at: now,
            updated_at: now,
            expires_at: now + 86_400, // 24 hour default expiry
        }
    }

    /// Check if checkout can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Configure => true,
            CheckoutStep::Delivery => true,
            CheckoutStep::Review => {
                self.email.is_some()
                    && self
                        .delivery_address
                        .as_ref()
                        .map(|a| a.is_complete())
                        .unwrap_or(false)
                    && self.quote.is_some()
            }
            CheckoutStep::Agreement => self.can_advance_to(CheckoutStep::Review),
            CheckoutStep::Payment => {
                self.can_advance_to(CheckoutStep::Agreement) && self.agreement_signed
            }
            CheckoutStep::Complete => {
                self.can_advance_to(CheckoutStep::Payment) && self.payment_token.is_some()
            }
        }
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Configure => CheckoutStep::Delivery,
            CheckoutStep::Delivery => CheckoutStep::Review,
            CheckoutStep::Review => CheckoutStep::Agreement,
            CheckoutStep::Agreement => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Complete,
            CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: "complete".to_string(),
                    to: "none".to_string(),
                })
            }
        };

        if !self.can_advance_to(next) {
            return Err(CommerceError::CheckoutIncomplete(
                self.missing_for_step(next).join(", "),
            ));
        }

        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        self.step = next;
        self.updated_at = current_timestamp();

        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Configure => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: "configure".to_string(),
                    to: "none".to_string(),
                })
            }
            CheckoutStep::Delivery => CheckoutStep::Configure,
            CheckoutStep::Review => CheckoutStep::Delivery,
            CheckoutStep::Agreement => CheckoutStep::Review,
            CheckoutStep::Payment => CheckoutStep::Agreement,
            CheckoutStep::Complete => CheckoutStep::Payment,
        };

        self.step = prev;
        self.updated_at = current_timestamp();

        Ok(prev)
    }

    /// Go to a specific step (if allowed).
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<(), CommerceError> {
        // Can revisit any completed step or stay put
        if step == self.step || self.completed_steps.contains(&step) {
            self.step = step;
            self.updated_at = current_timestamp();
            Ok(())
        } else if self.can_advance_to(step) && step.number() == self.step.number() + 1 {
            self.advance()?;
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: step.as_str().to_string(),
            })
        }
    }

    /// Get what's missing to advance to a step.
    fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Review => {
                if self.email.is_none() {
                    missing.push("email");
                }
                if !self
                    .delivery_address
                    .as_ref()
                    .map(|a| a.is_complete())
                    .unwrap_or(false)
                {
                    missing.push("delivery address");
                }
                if self.quote.is_none() {
                    missing.push("delivery quote");
                }
            }
            CheckoutStep::Agreement => {
                missing.extend(self.missing_for_step(CheckoutStep::Review));
            }
            CheckoutStep::Payment => {
                missing.extend(self.missing_for_step(CheckoutStep::Agreement));
                if !self.agreement_signed {
                    missing.push("signed agreement");
                }
            }
            CheckoutStep::Complete => {
                missing.extend(self.missing_for_step(CheckoutStep::Payment));
                if self.payment_token.is_none() {
                    missing.push("payment method");
                }
            }
            _ => {}
        }
        missing
    }

    /// Set the customer email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
        self.updated_at = current_timestamp();
    }

    /// Set the delivery site address.
    pub fn set_delivery_address(&mut self, address: Address) {
        self.delivery_address = Some(address);
        self.updated_at = current_timestamp();
    }

    /// Record the accepted delivery quote.
    pub fn set_quote(&mut self, quote: DeliveryQuote) {
        self.quote = Some(quote);
        self.updated_at = current_timestamp();
    }

    /// Mark the purchase agreement as signed (e-sign callback).
    pub fn mark_agreement_signed(&mut self) {
        self.agreement_signed = true;
        self.updated_at = current_timestamp();
    }

    /// Set the payment token.
    pub fn set_payment_token(&mut self, token: impl Into<String>) {
        self.payment_token = Some(token.into());
        self.updated_at = current_timestamp();
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Check if checkout has expired.
    pub fn is_expired(&self) -> bool {
        current_timestamp() > self.expires_at
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
    use crate::money::{Currency, Money};

    fn quote() -> DeliveryQuote {
        DeliveryQuote {
            fee: Money::new(250_000, Currency::USD),
            distance_miles: 480.0,
            eta_weeks_min: 2,
            eta_weeks_max: 4,
        }
    }

    fn address() -> Address {
        Address::new(
            "June",
            "Park",
            "14800 S Forsythe Rd",
            "Oregon City",
            "97045",
            "US",
        )
    }

    #[test]
    fn test_flow_creation() {
        let flow = CheckoutFlow::new(CartId::new("cart-1"));
        assert_eq!(flow.step, CheckoutStep::Configure);
        assert!(flow.completed_steps.is_empty());
    }

    #[test]
    fn test_review_requires_quote_and_address() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-1"));
        flow.advance().unwrap(); // Configure -> Delivery

        // Missing everything
        assert!(flow.advance().is_err());

        flow.set_email("june@example.com");
        flow.set_delivery_address(address());
        assert!(flow.advance().is_err());

        flow.set_quote(quote());
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Review);
    }

    #[test]
    fn test_payment_requires_signed_agreement() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-1"));
        flow.set_email("june@example.com");
        flow.set_delivery_address(address());
        flow.set_quote(quote());

        flow.advance().unwrap(); // -> Delivery
        flow.advance().unwrap(); // -> Review
        flow.advance().unwrap(); // -> Agreement

        let err = flow.advance();
        assert!(matches!(err, Err(CommerceError::CheckoutIncomplete(_))));

        flow.mark_agreement_signed();
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_go_back() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-1"));
        flow.advance().unwrap();
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Configure);
        assert!(flow.go_back().is_err());
    }

    #[test]
    fn test_go_to_completed_step() {
        let mut flow = CheckoutFlow::new(CartId::new("cart-1"));
        flow.advance().unwrap(); // Configure completed
        assert!(flow.go_to(CheckoutStep::Configure).is_ok());
        assert!(flow.go_to(CheckoutStep::Payment).is_err());
    }
}
