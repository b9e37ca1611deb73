use std::fmt;

use serde::Serialize;

use super::crypto::CryptoQuote;
use super::rates::ExchangeRateTable;
use crate::errors::FailureKind;

/// Normalized payload produced by a source.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceValue {
    Text(String),
    List(Vec<String>),
    Rates(ExchangeRateTable),
    Crypto(CryptoQuote),
}

impl SourceValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_rates(&self) -> Option<&ExchangeRateTable> {
        match self {
            Self::Rates(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_crypto(&self) -> Option<&CryptoQuote> {
        match self {
            Self::Crypto(quote) => Some(quote),
            _ => None,
        }
    }
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "- {}", item)?;
                }
                Ok(())
            }
            Self::Rates(table) => {
                if table.is_empty() {
                    return f.write_str("No exchange rates available.");
                }
                let rendered: Vec<String> = table
                    .iter()
                    .map(|(code, rate)| format!("{}: {}", code, rate))
                    .collect();
                f.write_str(&rendered.join(", "))
            }
            Self::Crypto(quote) => quote.fmt(f),
        }
    }
}

/// Why a source failed and what to show instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceFailure {
    pub kind: FailureKind,
    /// Source-specific placeholder rendered in place of data
    pub fallback: SourceValue,
}

/// Outcome of one adapter invocation. Adapters never return anything else.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SourceResult {
    Ok(SourceValue),
    Failed(SourceFailure),
}

impl SourceResult {
    pub fn failed(kind: FailureKind, fallback: SourceValue) -> Self {
        Self::Failed(SourceFailure { kind, fallback })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Ok(_) => None,
            Self::Failed(failure) => Some(failure.kind),
        }
    }

    /// The fetched value, if the source succeeded.
    pub fn value(&self) -> Option<&SourceValue> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// The value to render: fetched data or the fallback placeholder.
    pub fn display_value(&self) -> &SourceValue {
        match self {
            Self::Ok(value) => value,
            Self::Failed(failure) => &failure.fallback,
        }
    }
}
