//! Order types and payment reconciliation.

use crate::cart::{Cart, OptionSelection, PricingBreakdown};
use crate::checkout::{Address, CheckoutFlow};
use crate::error::CommerceError;
use crate::ids::{ModelId, OrderId, UserId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed, deposit received.
    Confirmed,
    /// Home is being built.
    InProduction,
    /// Built and awaiting transport.
    ReadyForDelivery,
    /// Delivered to the site.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// Order refunded.
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::InProduction => "In Production",
            OrderStatus::ReadyForDelivery => "Ready for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::InProduction
        )
    }
}

/// Payment status, driven by processor webhook events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// No payment received yet.
    #[default]
    Pending,
    /// Deposit captured, balance outstanding.
    DepositPaid,
    /// Fully paid.
    Paid,
    /// Partially refunded.
    PartiallyRefunded,
    /// Fully refunded.
    Refunded,
    /// Payment voided.
    Voided,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::DepositPaid => "deposit_paid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::PartiallyRefunded => "partially_refunded",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Voided => "voided",
        }
    }
}

/// Purchase agreement status, driven by e-sign callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AgreementStatus {
    /// Agreement not sent yet.
    #[default]
    NotSent,
    /// Sent to the buyer.
    Sent,
    /// Opened by the buyer.
    Viewed,
    /// Signed.
    Signed,
    /// Declined.
    Declined,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementStatus::NotSent => "not_sent",
            AgreementStatus::Sent => "sent",
            AgreementStatus::Viewed => "viewed",
            AgreementStatus::Signed => "signed",
            AgreementStatus::Declined => "declined",
        }
    }
}

/// Result of comparing an order total against a processor-confirmed charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Reconciliation {
    /// Charge matches the order total exactly.
    Matched,
    /// Charge differs; the order needs manual review.
    Mismatch { expected: Money, charged: Money },
}

impl Reconciliation {
    pub fn is_matched(&self) -> bool {
        matches!(self, Reconciliation::Matched)
    }
}

/// A placed order: an immutable snapshot of a priced configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Customer user ID (None for guest).
    pub user_id: Option<UserId>,
    /// Customer email.
    pub email: String,
    /// Order status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Purchase agreement status.
    pub agreement_status: AgreementStatus,
    /// Model ID.
    pub model_id: ModelId,
    /// Model name at time of order.
    pub model_name: String,
    /// Model SKU at time of order.
    pub model_sku: String,
    /// Option selections at time of order.
    pub selections: Vec<OptionSelection>,
    /// Delivery site address.
    pub delivery_address: Address,
    /// Minimum estimated weeks until delivery.
    pub eta_weeks_min: u32,
    /// Maximum estimated weeks until delivery.
    pub eta_weeks_max: u32,
    /// The pricing breakdown the buyer agreed to.
    pub pricing: PricingBreakdown,
    /// Order currency.
    pub currency: Currency,
    /// Flagged for manual reconciliation review.
    pub needs_review: bool,
    /// Customer note.
    pub note: Option<String>,
    /// Additional metadata.
    pub metadata: serde_json::Value,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Unix timestamp when cancelled (if applicable).
    pub cancelled_at: Option<i64>,
}

impl Order {
    /// Place an order from a priced cart and a completed checkout flow.
    ///
    /// Fails with `CheckoutIncomplete` naming the first missing piece.
    pub fn place(cart: &Cart, flow: &CheckoutFlow) -> Result<Self, CommerceError> {
        let model_id = cart.model_id.clone().ok_or(CommerceError::ModelNotChosen)?;
        let pricing = cart
            .pricing
            .clone()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("pricing".to_string()))?;
        let email = flow
            .email
            .clone()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("email".to_string()))?;
        let delivery_address = flow
            .delivery_address
            .clone()
            .filter(|a| a.is_complete())
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery address".to_string()))?;
        let quote = flow
            .quote
            .as_ref()
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery quote".to_string()))?;

        let now = current_timestamp();
        Ok(Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(),
            user_id: cart.user_id.clone(),
            email,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            agreement_status: if flow.agreement_signed {
                AgreementStatus::Signed
            } else {
                AgreementStatus::NotSent
            },
            model_id,
            model_name: cart.model_name.clone().unwrap_or_default(),
            model_sku: cart.model_sku.clone().unwrap_or_default(),
            selections: cart.selections.clone(),
            delivery_address,
            eta_weeks_min: quote.eta_weeks_min,
            eta_weeks_max: quote.eta_weeks_max,
            pricing,
            currency: cart.currency,
            needs_review: false,
            note: cart.note.clone(),
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        })
    }

    /// Generate a new order number.
    pub fn generate_order_number() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("HAUS-{}", ts)
    }

    /// Reconcile a processor-confirmed charge against the order total.
    ///
    /// The amounts must agree exactly, in minor currency units. Any
    /// difference — including a currency difference — flags the order for
    /// manual review.
    pub fn reconcile(&mut self, charged: Money) -> Reconciliation {
        let expected = self.pricing.total;
        if charged == expected {
            return Reconciliation::Matched;
        }
        self.needs_review = true;
        self.updated_at = current_timestamp();
        Reconciliation::Mismatch { expected, charged }
    }

    /// Get total selected option count.
    pub fn option_count(&self) -> i64 {
        self.selections.iter().map(|s| s.quantity).sum()
    }

    /// Check if the order is paid (fully or deposit).
    pub fn is_paid(&self) -> bool {
        matches!(
            self.payment_status,
            PaymentStatus::DepositPaid | PaymentStatus::Paid | PaymentStatus::PartiallyRefunded
        )
    }

    /// Cancel the order.
    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(current_timestamp());
        self.updated_at = current_timestamp();
        true
    }

    /// Update order status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = current_timestamp();
    }

    /// Update payment status (webhook handler).
    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
        self.updated_at = current_timestamp();
    }

    /// Update agreement status (e-sign callback handler).
    pub fn set_agreement_status(&mut self, status: AgreementStatus) {
        self.agreement_status = status;
        self.updated_at = current_timestamp();
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
    use crate::cart::TaxInput;
    use crate::catalog::{HomeModel, ModelOption, OptionCategory};
    use crate::delivery::DeliveryQuote;
    use crate::ids::{CartId, OptionCode};

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn placed_order() -> Order {
        let mut model = HomeModel::new("HAUS-S1", "Sitka", "sitka", usd(5_000_000))
            .with_setup_fee(usd(80_000));
        model.add_option(OptionCode::new("flooring-oak"));

        let flooring = ModelOption::new(
            "flooring-oak",
            "Upgraded Flooring",
            OptionCategory::Interior,
            usd(120_000),
        );

        let mut cart = Cart::new("session-1");
        cart.choose_model(&model).unwrap();
        cart.select_option(&flooring, 1).unwrap();
        cart.set_delivery_quote(DeliveryQuote {
            fee: usd(250_000),
            distance_miles: 480.0,
            eta_weeks_min: 2,
            eta_weeks_max: 4,
        })
        .unwrap();
        cart.reprice(TaxInput::Amount(usd(0))).unwrap();

        let mut flow = CheckoutFlow::new(CartId::new("cart-1"));
        flow.set_email("june@example.com");
        flow.set_delivery_address(Address::new(
            "June",
            "Park",
            "14800 S Forsythe Rd",
            "Oregon City",
            "97045",
            "US",
        ));
        flow.set_quote(cart.delivery.clone().unwrap());
        flow.mark_agreement_signed();

        Order::place(&cart, &flow).unwrap()
    }

    #[test]
    fn test_place_snapshots_pricing_and_eta() {
        let order = placed_order();
        assert_eq!(order.pricing.total.amount_cents, 5_450_000);
        assert_eq!(order.eta_weeks_min, 2);
        assert_eq!(order.eta_weeks_max, 4);
        assert_eq!(order.agreement_status, AgreementStatus::Signed);
        assert!(order.order_number.starts_with("HAUS-"));
    }

    #[test]
    fn test_place_requires_pricing() {
        let mut model = HomeModel::new("HAUS-S1", "Sitka", "sitka", usd(5_000_000));
        model.add_option(OptionCode::new("flooring-oak"));
        let mut cart = Cart::new("session-1");
        cart.choose_model(&model).unwrap();

        let flow = CheckoutFlow::new(CartId::new("cart-1"));
        assert!(matches!(
            Order::place(&cart, &flow),
            Err(CommerceError::CheckoutIncomplete(_))
        ));
    }

    #[test]
    fn test_reconcile_exact_match() {
        let mut order = placed_order();
        let result = order.reconcile(usd(5_450_000));
        assert!(result.is_matched());
        assert!(!order.needs_review);
    }

    #[test]
    fn test_reconcile_flags_one_cent_mismatch() {
        let mut order = placed_order();
        let result = order.reconcile(usd(5_450_001));
        assert!(matches!(result, Reconciliation::Mismatch { .. }));
        assert!(order.needs_review);
    }

    #[test]
    fn test_reconcile_flags_currency_mismatch() {
        let mut order = placed_order();
        let result = order.reconcile(Money::new(5_450_000, Currency::CAD));
        assert!(!result.is_matched());
        assert!(order.needs_review);
    }

    #[test]
    fn test_cancel_rules() {
        let mut order = placed_order();
        assert!(order.status.can_cancel());
        assert!(order.cancel());
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(!order.cancel());
    }

    #[test]
    fn test_payment_status_updates() {
        let mut order = placed_order();
        assert!(!order.is_paid());
        order.set_payment_status(PaymentStatus::DepositPaid);
        assert!(order.is_paid());
    }
}
