//! Quote service error types.

use thiserror::Error;

/// Errors surfaced by the quote service.
///
/// `InvalidInput` needs corrected input; `ServiceUnavailable` is the only
/// kind callers should retry automatically (with backoff).
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Destination is empty, malformed, or outside the service region.
    #[error("Invalid destination: {0}")]
    InvalidInput(String),

    /// The distance lookup collaborator could not be reached.
    #[error("Distance service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl QuoteError {
    /// Check if a retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuoteError::ServiceUnavailable(_))
    }
}
