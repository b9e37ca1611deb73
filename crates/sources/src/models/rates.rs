use std::collections::BTreeMap;

use serde::Serialize;

use super::types::Currency;

/// Exchange rates relative to a base currency.
///
/// Only positive, finite rates are admitted. An empty table is the failure
/// value of the rate helper; it is never absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExchangeRateTable {
    #[serde(skip)]
    base: Currency,
    #[serde(flatten)]
    rates: BTreeMap<Currency, f64>,
}

impl ExchangeRateTable {
    pub fn new(base: impl Into<Currency>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            rates: BTreeMap::new(),
        }
    }

    /// Insert a rate, returning `false` when it was rejected.
    pub fn insert(&mut self, code: &str, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        self.rates.insert(code.to_uppercase(), rate);
        true
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}
