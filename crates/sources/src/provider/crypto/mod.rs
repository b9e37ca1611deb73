//! Crypto price from API Ninjas, converted into a secondary currency.
//!
//! Two upstream calls in sequence: the USD price, then the USD rate of the
//! secondary currency through the [`RateProvider`]. The rate call is skipped
//! when the price call failed. A missing rate does not fail the quote; the
//! price is reported unconverted and [`CryptoQuote::converted`] is `false`.
//!
//! API documentation: https://api-ninjas.com/api/cryptoprice

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::fx::RateProvider;
use crate::http;
use crate::models::{CryptoQuote, Currency, SourceName, SourceParams, SourceValue};
use crate::provider::quote::API_KEY_HEADER;
use crate::provider::{ResponseFormat, SourceAdapter};

/// Currency the upstream prices are denominated in
const PRICE_CURRENCY: &str = "USD";

const INVALID_SYMBOL: &str = "Invalid symbol.";
const INVALID_DATA: &str = "Invalid data received from the API.";
const FETCH_FAILED: &str = "Failed to fetch crypto price.";

/// The upstream sends prices as strings, but accept plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Text that is not a finite number is a wrong-typed field.
    fn as_f64(&self, field: &str) -> Result<f64, SourceError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| SourceError::Parse(format!("{} is not a number: {:?}", field, s)))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SourceError::Parse(format!("{} is not finite", field)))
        }
    }
}

/// Numeric field that must be present and strictly positive.
fn positive(value: Option<&Numeric>, field: &str) -> Result<f64, SourceError> {
    let value = value
        .ok_or_else(|| SourceError::InvalidData(format!("missing {}", field)))?
        .as_f64(field)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SourceError::InvalidData(format!("non-positive {}", field)))
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    symbol: Option<String>,
    price: Option<Numeric>,
    timestamp: Option<Numeric>,
}

/// Raw price before conversion.
#[derive(Debug)]
struct RawPrice {
    symbol: String,
    price: f64,
    timestamp: i64,
}

impl PriceResponse {
    fn into_raw(self) -> Result<RawPrice, SourceError> {
        let symbol = self
            .symbol
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SourceError::InvalidData("missing symbol".to_string()))?;
        let price = positive(self.price.as_ref(), "price")?;
        let timestamp = positive(self.timestamp.as_ref(), "timestamp")?;
        if timestamp >= i64::MAX as f64 {
            return Err(SourceError::InvalidData("timestamp out of range".to_string()));
        }

        Ok(RawPrice {
            symbol,
            price,
            timestamp: timestamp as i64,
        })
    }
}

pub struct CryptoAdapter {
    client: Client,
    endpoint: Endpoint,
    rates: Arc<dyn RateProvider>,
    secondary_currency: Currency,
}

impl CryptoAdapter {
    pub fn new(
        client: Client,
        endpoint: Endpoint,
        rates: Arc<dyn RateProvider>,
        secondary_currency: impl Into<Currency>,
    ) -> Self {
        Self {
            client,
            endpoint,
            rates,
            secondary_currency: secondary_currency.into().to_uppercase(),
        }
    }

    fn symbol(params: &SourceParams) -> Result<&str, SourceError> {
        match params {
            SourceParams::Symbol(symbol) if !symbol.trim().is_empty() => Ok(symbol.trim()),
            SourceParams::Symbol(_) => Err(SourceError::InvalidInput("empty symbol".to_string())),
            other => Err(SourceError::InvalidInput(format!(
                "crypto expects a symbol, got {:?}",
                other
            ))),
        }
    }

    async fn fetch_price(&self, symbol: &str) -> Result<RawPrice, SourceError> {
        let request = self
            .client
            .get(self.endpoint.url("/v1/cryptoprice"))
            .header(API_KEY_HEADER, self.endpoint.key())
            .query(&[("symbol", symbol)]);

        let response: PriceResponse = http::get_json(request).await?;
        response.into_raw()
    }
}

#[async_trait]
impl SourceAdapter for CryptoAdapter {
    fn name(&self) -> SourceName {
        SourceName::Crypto
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::InvalidInput => INVALID_SYMBOL,
            FailureKind::InvalidData => INVALID_DATA,
            _ => FETCH_FAILED,
        };
        SourceValue::Text(message.to_string())
    }

    fn validate(&self, params: &SourceParams) -> Result<(), SourceError> {
        Self::symbol(params).map(|_| ())
    }

    async fn fetch_value(&self, params: &SourceParams) -> Result<SourceValue, SourceError> {
        let symbol = Self::symbol(params)?;
        let raw = self.fetch_price(symbol).await?;

        let table = self
            .rates
            .rates(PRICE_CURRENCY, std::slice::from_ref(&self.secondary_currency))
            .await;
        let rate = table.get(&self.secondary_currency);
        if rate.is_none() {
            warn!(
                "No {}/{} rate available, reporting {} unconverted",
                PRICE_CURRENCY, self.secondary_currency, raw.symbol
            );
        }

        let quote = CryptoQuote::new(
            raw.symbol,
            raw.price,
            raw.timestamp,
            self.secondary_currency.clone(),
            rate,
        )?;
        debug!("Crypto quote: {}", quote);

        Ok(SourceValue::Crypto(quote))
    }
}
