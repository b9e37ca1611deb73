use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SourceError;

/// Currency code (ISO 4217, upper case)
pub type Currency = String;

/// Identity of one upstream source. Also the key of a snapshot entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceName {
    News,
    Horoscope,
    History,
    Weather,
    Quote,
    ExchangeRates,
    Fact,
    Crypto,
}

impl SourceName {
    pub const ALL: [SourceName; 8] = [
        SourceName::News,
        SourceName::Horoscope,
        SourceName::History,
        SourceName::Weather,
        SourceName::Quote,
        SourceName::ExchangeRates,
        SourceName::Fact,
        SourceName::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Horoscope => "horoscope",
            Self::History => "history",
            Self::Weather => "weather",
            Self::Quote => "quote",
            Self::ExchangeRates => "exchange_rates",
            Self::Fact => "fact",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceName {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SourceError::InvalidInput(format!("Unknown source: {}", s)))
    }
}

/// Adapter-specific request parameters.
///
/// Each adapter accepts the variant it understands and rejects the others as
/// invalid input before touching the network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceParams {
    /// Sources that take no parameter (news, history, quote, fact).
    #[default]
    None,
    /// Zodiac sign name, matched case-insensitively.
    Sign(String),
    /// City or free-form location for weather.
    Location(String),
    /// Trading pair symbol for the crypto price, e.g. `TRXUSD`.
    Symbol(String),
    /// Base currency and requested target codes for exchange rates.
    Rates {
        base: Currency,
        targets: Vec<Currency>,
    },
}
