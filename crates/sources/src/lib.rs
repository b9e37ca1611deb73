//! Daybrief Sources Crate
//!
//! This crate fetches short-lived snippets (headlines, horoscope, history,
//! weather, a quote, exchange rates, a random fact, a converted crypto
//! price) from independent, unreliable upstreams and assembles them into a
//! single composite snapshot.
//!
//! # Architecture
//!
//! ```text
//!                      +------------------+
//!    SnapshotRequest ->|    Aggregator    |-> CompositeSnapshot
//!                      +------------------+
//!                         |  (fan-out, per-adapter deadline)
//!                         v
//!        +-----------------------------------------------+
//!        | SourceAdapter x8  (news, horoscope, history,  |
//!        | weather, quote, exchange_rates, fact, crypto) |
//!        +-----------------------------------------------+
//!                         |                 |
//!                         |                 v  (crypto, exchange_rates)
//!                         |        +------------------+
//!                         |        |   RateProvider   |
//!                         |        +------------------+
//!                         v
//!                   SourceResult  (Ok(value) | Failed(kind, fallback))
//! ```
//!
//! No adapter ever returns an error: every failure is converted at the
//! adapter boundary into a [`SourceResult::Failed`] carrying a coarse
//! [`FailureKind`] and a source-specific fallback placeholder. A snapshot
//! therefore always holds exactly the requested keys.
//!
//! # Core Types
//!
//! - [`Aggregator`] - Builds snapshots from a set of adapters
//! - [`SourceAdapter`] - Contract every source implements
//! - [`RateProvider`] - Exchange rate helper used for currency conversion
//! - [`CompositeSnapshot`] - Immutable per-request result
//! - [`SourcesConfig`] - Credentials, base URLs and timeouts

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod fx;
pub mod http;
pub mod models;
pub mod provider;

pub use aggregator::Aggregator;
pub use config::{Endpoint, SnapshotDefaults, SourcesConfig};
pub use errors::{FailureKind, SourceError};
pub use fx::{ExchangeRateApiClient, RateProvider};
pub use models::{
    CompositeSnapshot, CryptoQuote, Currency, ExchangeRateTable, SnapshotRequest, SourceFailure,
    SourceName, SourceParams, SourceResult, SourceValue, ZodiacSign,
};
pub use provider::{ResponseFormat, SourceAdapter};
