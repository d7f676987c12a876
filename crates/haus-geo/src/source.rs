//! The distance source trait.

use crate::GeoError;
use async_trait::async_trait;

/// A source of depot-to-destination road distances.
///
/// Implementations must be deterministic per destination: asking twice for
/// the same ZIP yields the same distance (the routing data may change over
/// days, not between two calls in one session).
#[async_trait]
pub trait DistanceSource: Send + Sync {
    /// Road distance in miles from the depot to a five-digit ZIP.
    async fn distance_miles(&self, zip: &str) -> Result<f64, GeoError>;
}
