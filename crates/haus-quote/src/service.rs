//! The quote service.

use crate::QuoteError;
use haus_commerce::delivery::{DeliveryQuote, RateCard, ZipCode};
use haus_geo::{DistanceSource, GeoError};
use std::sync::Arc;

/// Produces delivery quotes for destination ZIP codes.
///
/// Pure apart from the single outbound distance lookup: the service holds
/// no mutable state, and the fee math is the deterministic rate-card
/// formula. Both collaborators are passed in at construction.
pub struct QuoteService {
    source: Arc<dyn DistanceSource>,
    rates: RateCard,
}

impl QuoteService {
    /// Create a service over a distance source and rate card.
    pub fn new(source: Arc<dyn DistanceSource>, rates: RateCard) -> Self {
        Self { source, rates }
    }

    /// The rate card in use.
    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    /// Estimate delivery to a ZIP code.
    ///
    /// Fails with [`QuoteError::InvalidInput`] for a malformed or
    /// unserviceable ZIP and [`QuoteError::ServiceUnavailable`] when the
    /// lookup collaborator cannot be reached. The lookup is idempotent, so
    /// `ServiceUnavailable` is safe to retry.
    pub async fn estimate(&self, zip: &str) -> Result<DeliveryQuote, QuoteError> {
        let zip = ZipCode::parse(zip).map_err(|e| QuoteError::InvalidInput(e.to_string()))?;

        let miles = self
            .source
            .distance_miles(zip.as_str())
            .await
            .map_err(map_geo_error)?;

        tracing::debug!(zip = %zip, miles, "resolved destination distance");

        self.rates
            .quote(miles)
            .map_err(|e| QuoteError::ServiceUnavailable(e.to_string()))
    }
}

/// Map a lookup failure onto the caller-facing taxonomy.
fn map_geo_error(err: GeoError) -> QuoteError {
    match err {
        GeoError::Unserviceable(zip) => QuoteError::InvalidInput(zip),
        other => QuoteError::ServiceUnavailable(other.to_string()),
    }
}
