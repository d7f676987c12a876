//! Delivery quoting: quote types, ZIP parsing, rate-card fee math.

mod quote;
mod rate;
mod zip;

pub use quote::DeliveryQuote;
pub use rate::RateCard;
pub use zip::ZipCode;
