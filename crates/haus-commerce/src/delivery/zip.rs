//! ZIP code parsing.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated five-digit US ZIP code.
///
/// ZIP+4 input is accepted and normalized to its five-digit prefix; that
/// is all the delivery estimate needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZipCode(String);

impl ZipCode {
    /// Parse a ZIP code string.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CommerceError::InvalidZip(input.to_string()));
        }

        let five = match trimmed.split_once('-') {
            Some((zip, plus4)) => {
                if plus4.len() != 4 || !plus4.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CommerceError::InvalidZip(input.to_string()));
                }
                zip
            }
            None => trimmed,
        };

        if five.len() != 5 || !five.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommerceError::InvalidZip(input.to_string()));
        }

        Ok(Self(five.to_string()))
    }

    /// Get the ZIP as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three-digit USPS sectional center prefix.
    pub fn sectional_prefix(&self) -> &str {
        &self.0[..3]
    }
}

impl FromStr for ZipCode {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
