//! Static distance table.

use crate::{DistanceSource, GeoError};
use async_trait::async_trait;
use std::collections::HashMap;

/// An in-memory distance table keyed by three-digit ZIP sectional prefix.
///
/// Sectional-prefix resolution is coarse (a sectional center spans tens of
/// miles) but deterministic, which is what tests and offline tooling need.
#[derive(Debug, Clone, Default)]
pub struct StaticDistanceTable {
    routes: HashMap<String, f64>,
}

impl StaticDistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for a sectional prefix.
    pub fn with_route(mut self, prefix: impl Into<String>, miles: f64) -> Self {
        self.routes.insert(prefix.into(), miles);
        self
    }

    /// Add routes in bulk.
    pub fn with_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (prefix, miles) in routes {
            self.routes.insert(prefix.into(), miles);
        }
        self
    }

    /// Number of known routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[async_trait]
impl DistanceSource for StaticDistanceTable {
    async fn distance_miles(&self, zip: &str) -> Result<f64, GeoError> {
        let prefix = zip.get(..3).unwrap_or(zip);
        self.routes
            .get(prefix)
            .copied()
            .ok_or_else(|| GeoError::Unserviceable(zip.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StaticDistanceTable {
        StaticDistanceTable::new()
            .with_route("970", 18.0)
            .with_route("971", 24.5)
            .with_route("945", 612.0)
    }

    #[tokio::test]
    async fn test_lookup_by_prefix() {
        let miles = table().distance_miles("97045").await.unwrap();
        assert!((miles - 18.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_lookup_is_deterministic() {
        let t = table();
        let a = t.distance_miles("94550").await.unwrap();
        let b = t.distance_miles("94550").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_unknown_prefix_is_unserviceable() {
        let err = table().distance_miles("10001").await.unwrap_err();
        assert!(matches!(err, GeoError::Unserviceable(_)));
        assert!(!err.is_retryable());
    }
}
