//! Delivery site address types.

use crate::ids::AddressId;
use serde::{Deserialize, Serialize};

/// A delivery site address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// Address ID (None for unsaved addresses).
    pub id: Option<AddressId>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2 (lot, unit, access road).
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// State code (e.g., "OR").
    pub state: Option<String>,
    /// Postal/ZIP code.
    pub zip: String,
    /// Country code (e.g., "US").
    pub country_code: String,
    /// Phone number for the delivery crew.
    pub phone: Option<String>,
}

impl Address {
    /// Create a new address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address1: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address1: address1.into(),
            address2: None,
            city: city.into(),
            state: None,
            zip: zip.into(),
            country_code: country_code.into(),
            phone: None,
        }
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as a single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            parts.push(addr2.clone());
        }
        parts.push(self.city.clone());
        if let Some(ref state) = self.state {
            parts.push(state.clone());
        }
        parts.push(self.zip.clone());
        parts.push(self.country_code.clone());
        parts.join(", ")
    }

    /// Format as multiple lines for a confirmation page.
    pub fn multi_line(&self) -> String {
        let mut lines = vec![self.full_name(), self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            lines.push(addr2.clone());
        }
        let city_line = if let Some(ref state) = self.state {
            format!("{}, {} {}", self.city, state, self.zip)
        } else {
            format!("{} {}", self.city, self.zip)
        };
        lines.push(city_line);
        lines.push(self.country_code.clone());
        lines.join("\n")
    }

    /// Check if the address has everything a delivery needs.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.address1.is_empty()
            && !self.city.is_empty()
            && !self.zip.is_empty()
            && !self.country_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_creation() {
        let addr = Address::new(
            "June",
            "Park",
            "14800 S Forsythe Rd",
            "Oregon City",
            "97045",
            "US",
        );
        assert_eq!(addr.full_name(), "June Park");
        assert!(addr.is_complete());
    }

    #[test]
    fn test_incomplete_address() {
        let addr = Address::new("June", "Park", "", "Oregon City", "97045", "US");
        assert!(!addr.is_complete());
    }

    #[test]
    fn test_one_line() {
        let mut addr = Address::new(
            "June",
            "Park",
            "14800 S Forsythe Rd",
            "Oregon City",
            "97045",
            "US",
        );
        addr.state = Some("OR".to_string());
        let line = addr.one_line();
        assert!(line.contains("Oregon City"));
        assert!(line.contains("OR"));
    }
}
