//! Delivery quote types.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An estimated delivery fee and lead-time window for one destination.
///
/// Produced fresh per ZIP query and never persisted on its own — when the
/// buyer proceeds, the fee and ETA fold into the cart and order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryQuote {
    /// Estimated delivery fee (>= 0).
    pub fee: Money,
    /// Road distance from the depot, in miles.
    pub distance_miles: f64,
    /// Minimum estimated weeks until delivery.
    pub eta_weeks_min: u32,
    /// Maximum estimated weeks until delivery.
    pub eta_weeks_max: u32,
}

impl DeliveryQuote {
    /// Get a lead-time estimate string (e.g., "2-4 weeks").
    pub fn eta_display(&self) -> String {
        if self.eta_weeks_min == self.eta_weeks_max {
            format!("{} weeks", self.eta_weeks_min)
        } else {
            format!("{}-{} weeks", self.eta_weeks_min, self.eta_weeks_max)
        }
    }
}
