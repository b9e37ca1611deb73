//! Source adapters.
//!
//! This module contains:
//! - The `SourceAdapter` trait every source implements
//! - Shared markup selection for the scraping adapters
//! - One adapter per upstream source
//!
//! Adapters are independent: each owns its request building and response
//! parsing, and none touches state shared with another. The aggregator only
//! ever sees the `SourceResult` returned by `SourceAdapter::fetch`.

mod markup;
mod traits;

pub mod crypto;
pub mod exchange_rates;
pub mod fact;
pub mod history;
pub mod horoscope;
pub mod news;
pub mod quote;
pub mod weather;

// Re-exports
pub use crypto::CryptoAdapter;
pub use exchange_rates::ExchangeRatesAdapter;
pub use fact::FactAdapter;
pub use history::HistoryAdapter;
pub use horoscope::HoroscopeAdapter;
pub use news::NewsAdapter;
pub use quote::QuoteAdapter;
pub use traits::{ResponseFormat, SourceAdapter};
pub use weather::WeatherAdapter;
