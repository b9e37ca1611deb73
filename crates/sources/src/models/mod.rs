//! Snapshot models
//!
//! This module contains the plain data exchanged between the adapters, the
//! aggregator and the caller:
//! - `types` - Source identity (SourceName), request parameters (SourceParams)
//! - `result` - Adapter outcome (SourceResult) and payload (SourceValue)
//! - `rates` - Exchange rate mapping (ExchangeRateTable)
//! - `crypto` - Converted crypto price (CryptoQuote)
//! - `zodiac` - Recognized horoscope signs (ZodiacSign)
//! - `snapshot` - Request set (SnapshotRequest) and composite result (CompositeSnapshot)

mod crypto;
mod rates;
mod result;
mod snapshot;
mod types;
mod zodiac;

pub use crypto::CryptoQuote;
pub use rates::ExchangeRateTable;
pub use result::{SourceFailure, SourceResult, SourceValue};
pub use snapshot::{CompositeSnapshot, SnapshotRequest};
pub use types::{Currency, SourceName, SourceParams};
pub use zodiac::ZodiacSign;
