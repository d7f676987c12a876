//! Distance lookup sources for Haus delivery quoting.
//!
//! The delivery estimator needs one fact from the outside world: the road
//! distance from the depot to a destination ZIP. [`DistanceSource`] is
//! that boundary. Two implementations are provided:
//!
//! - [`HttpDistanceSource`] — calls the routing service with a bounded
//!   timeout. The lookup is an idempotent GET and safe to retry.
//! - [`StaticDistanceTable`] — an in-memory table keyed by ZIP sectional
//!   prefix, for tests and offline use.

mod error;
mod http;
mod source;
mod table;

pub use error::GeoError;
pub use http::HttpDistanceSource;
pub use source::DistanceSource;
pub use table::StaticDistanceTable;
