//! Distance lookup error types.

use thiserror::Error;

/// Errors that can occur during a distance lookup.
#[derive(Error, Debug)]
pub enum GeoError {
    /// Failed to reach the routing service.
    #[error("Lookup transport error: {0}")]
    Transport(String),

    /// Lookup timed out.
    #[error("Lookup timed out")]
    Timeout,

    /// Routing service returned an unexpected status.
    #[error("Lookup failed with HTTP {status}")]
    HttpStatus { status: u16 },

    /// Failed to parse the routing service response.
    #[error("Failed to parse lookup response: {0}")]
    Decode(String),

    /// Destination is outside the serviceable region.
    #[error("Destination not serviceable: {0}")]
    Unserviceable(String),
}

impl GeoError {
    /// Check if a retry could plausibly succeed.
    ///
    /// Transport problems and timeouts are transient; an unserviceable
    /// destination is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeoError::Transport(_) | GeoError::Timeout => true,
            GeoError::HttpStatus { status } => *status >= 500,
            GeoError::Decode(_) | GeoError::Unserviceable(_) => false,
        }
    }
}
