//! HTTP-backed distance source.

use crate::{DistanceSource, GeoError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default timeout for a distance lookup.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body of the routing service.
#[derive(Debug, Deserialize)]
struct DistanceResponse {
    miles: f64,
}

/// A distance source backed by the routing service.
///
/// Issues `GET {base_url}/distance/{zip}` with a bounded timeout. The call
/// has no side effects, so callers may retry on [`GeoError::is_retryable`]
/// failures with backoff.
pub struct HttpDistanceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDistanceSource {
    /// Create a source with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeoError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a source with an explicit timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn lookup_url(&self, zip: &str) -> String {
        format!("{}/distance/{}", self.base_url.trim_end_matches('/'), zip)
    }
}

#[async_trait]
impl DistanceSource for HttpDistanceSource {
    async fn distance_miles(&self, zip: &str) -> Result<f64, GeoError> {
        let url = self.lookup_url(zip);
        tracing::debug!(%zip, %url, "distance lookup");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%zip, error = %e, "distance lookup failed");
            if e.is_timeout() {
                GeoError::Timeout
            } else {
                GeoError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%zip, status = status.as_u16(), "distance lookup rejected");
            return Err(map_status(status.as_u16(), zip));
        }

        let body: DistanceResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Decode(e.to_string()))?;

        if !body.miles.is_finite() || body.miles < 0.0 {
            return Err(GeoError::Decode(format!(
                "implausible distance: {}",
                body.miles
            )));
        }

        Ok(body.miles)
    }
}

/// Map a non-success HTTP status to a lookup error.
fn map_status(status: u16, zip: &str) -> GeoError {
    match status {
        // The service answers 404/422 for ZIPs outside the service region
        404 | 422 => GeoError::Unserviceable(zip.to_string()),
        _ => GeoError::HttpStatus { status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url_joins_cleanly() {
        let source = HttpDistanceSource::new("https://routes.example.com/").unwrap();
        assert_eq!(
            source.lookup_url("97045"),
            "https://routes.example.com/distance/97045"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status(404, "10001"),
            GeoError::Unserviceable(_)
        ));
        assert!(matches!(
            map_status(422, "10001"),
            GeoError::Unserviceable(_)
        ));
        assert!(matches!(
            map_status(503, "10001"),
            GeoError::HttpStatus { status: 503 }
        ));
        assert!(map_status(503, "10001").is_retryable());
        assert!(!map_status(404, "10001").is_retryable());
    }
}
