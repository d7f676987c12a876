//! Delivery quote service for the Haus store.
//!
//! Composes ZIP validation, a [`DistanceSource`], and a [`RateCard`] into
//! the quote contract the checkout calls: ZIP in, fee and lead-time window
//! out. Quotes are deterministic — the same ZIP against the same rate card
//! always yields the same quote.
//!
//! # Example
//!
//! ```rust,ignore
//! use haus_commerce::delivery::RateCard;
//! use haus_geo::StaticDistanceTable;
//! use haus_quote::QuoteService;
//! use std::sync::Arc;
//!
//! let source = Arc::new(StaticDistanceTable::new().with_route("970", 18.0));
//! let service = QuoteService::new(source, RateCard::default());
//!
//! let quote = service.estimate("97045").await?;
//! println!("{} ({})", quote.fee, quote.eta_display());
//! ```

mod error;
mod service;

pub use error::QuoteError;
pub use service::QuoteService;

pub use haus_geo::DistanceSource;
