use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::Currency;
use crate::errors::SourceError;

/// A cryptocurrency price in USD together with its conversion into a
/// secondary currency.
///
/// When no rate was available the conversion falls back to a multiplier of
/// 1.0 and `converted` is `false`, so `converted_price` then equals `price`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CryptoQuote {
    pub symbol: String,
    /// USD price reported by the upstream
    pub price: f64,
    /// Unix epoch seconds reported by the upstream
    pub timestamp: i64,
    pub quoted_at: DateTime<Utc>,
    pub secondary_currency: Currency,
    /// Multiplier applied to `price`
    pub rate: f64,
    pub converted_price: f64,
    pub converted: bool,
}

impl CryptoQuote {
    /// Build a quote, converting `price` with `rate` when one is known.
    ///
    /// Fails with [`SourceError::InvalidData`] when the price is not positive
    /// or the timestamp does not map to a calendar date.
    pub fn new(
        symbol: String,
        price: f64,
        timestamp: i64,
        secondary_currency: Currency,
        rate: Option<f64>,
    ) -> Result<Self, SourceError> {
        if symbol.trim().is_empty() {
            return Err(SourceError::InvalidData("empty symbol".to_string()));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(SourceError::InvalidData(format!(
                "non-positive price: {}",
                price
            )));
        }
        if timestamp <= 0 {
            return Err(SourceError::InvalidData(format!(
                "non-positive timestamp: {}",
                timestamp
            )));
        }
        let quoted_at = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
            SourceError::InvalidData(format!("timestamp out of range: {}", timestamp))
        })?;

        let (rate, converted) = match rate {
            Some(rate) if rate.is_finite() && rate > 0.0 => (rate, true),
            _ => (1.0, false),
        };

        Ok(Self {
            symbol,
            price,
            timestamp,
            quoted_at,
            secondary_currency,
            rate,
            converted_price: price * rate,
            converted,
        })
    }
}

impl std::fmt::Display for CryptoQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Price: {:.2} USD, {:.2} {}, Symbol: {}, Timestamp: {}",
            self.price,
            self.converted_price,
            self.secondary_currency,
            self.symbol,
            self.quoted_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
