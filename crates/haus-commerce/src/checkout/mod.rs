//! Checkout types: delivery address, step machine, orders.

mod address;
mod flow;
mod order;

pub use address::Address;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::{AgreementStatus, Order, OrderStatus, PaymentStatus, Reconciliation};
