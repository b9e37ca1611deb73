//! Exchange rates for a small set of currencies.
//!
//! Thin adapter over the [`RateProvider`] helper. `SourceParams::None` uses
//! the configured base and targets.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{FailureKind, SourceError};
use crate::fx::RateProvider;
use crate::models::{Currency, ExchangeRateTable, SourceName, SourceParams, SourceValue};
use crate::provider::{ResponseFormat, SourceAdapter};

pub struct ExchangeRatesAdapter {
    rates: Arc<dyn RateProvider>,
    base: Currency,
    targets: Vec<Currency>,
}

impl ExchangeRatesAdapter {
    pub fn new(rates: Arc<dyn RateProvider>, base: Currency, targets: Vec<Currency>) -> Self {
        Self {
            rates,
            base,
            targets,
        }
    }

    fn request<'a>(
        &'a self,
        params: &'a SourceParams,
    ) -> Result<(&'a str, &'a [Currency]), SourceError> {
        let (base, targets) = match params {
            SourceParams::None => (self.base.as_str(), self.targets.as_slice()),
            SourceParams::Rates { base, targets } => (base.as_str(), targets.as_slice()),
            other => {
                return Err(SourceError::InvalidInput(format!(
                    "exchange rates expect a base and targets, got {:?}",
                    other
                )))
            }
        };

        if base.trim().is_empty() {
            return Err(SourceError::InvalidInput("empty base currency".to_string()));
        }
        if targets.is_empty() || targets.iter().any(|t| t.trim().is_empty()) {
            return Err(SourceError::InvalidInput(
                "no target currencies requested".to_string(),
            ));
        }

        Ok((base, targets))
    }
}

#[async_trait]
impl SourceAdapter for ExchangeRatesAdapter {
    fn name(&self) -> SourceName {
        SourceName::ExchangeRates
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, _kind: FailureKind) -> SourceValue {
        SourceValue::Rates(ExchangeRateTable::new(self.base.as_str()))
    }

    fn validate(&self, params: &SourceParams) -> Result<(), SourceError> {
        self.request(params).map(|_| ())
    }

    async fn fetch_value(&self, params: &SourceParams) -> Result<SourceValue, SourceError> {
        let (base, targets) = self.request(params)?;
        let table = self.rates.try_rates(base, targets).await?;

        if table.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(SourceValue::Rates(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRates {
        calls: AtomicUsize,
        available: Vec<(&'static str, f64)>,
    }

    #[async_trait]
    impl RateProvider for MockRates {
        async fn try_rates(
            &self,
            base: &str,
            targets: &[Currency],
        ) -> Result<ExchangeRateTable, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut table = ExchangeRateTable::new(base);
            for (code, rate) in &self.available {
                if targets.iter().any(|t| t.eq_ignore_ascii_case(code)) {
                    table.insert(code, *rate);
                }
            }
            Ok(table)
        }
    }

    fn adapter(available: Vec<(&'static str, f64)>) -> (ExchangeRatesAdapter, Arc<MockRates>) {
        let rates = Arc::new(MockRates {
            calls: AtomicUsize::new(0),
            available,
        });
        let adapter = ExchangeRatesAdapter::new(
            rates.clone(),
            "USD".to_string(),
            vec!["EUR".to_string(), "INR".to_string(), "GBP".to_string()],
        );
        (adapter, rates)
    }

    #[tokio::test]
    async fn test_default_targets() {
        let (adapter, _) = adapter(vec![
            ("EUR", 0.92),
            ("INR", 83.0),
            ("GBP", 0.79),
            ("JPY", 150.0),
        ]);
        let result = adapter.fetch(&SourceParams::None).await;
        let table = result.value().and_then(SourceValue::as_rates).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.contains("JPY"));
    }

    #[tokio::test]
    async fn test_nothing_available_is_empty_result() {
        let (adapter, rates) = adapter(vec![]);
        let result = adapter.fetch(&SourceParams::None).await;
        assert_eq!(result.failure_kind(), Some(FailureKind::Empty));
        assert!(result.display_value().as_rates().unwrap().is_empty());
        assert_eq!(rates.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_targets_rejected_before_fetch() {
        let (adapter, rates) = adapter(vec![("EUR", 0.92)]);
        let result = adapter
            .fetch(&SourceParams::Rates {
                base: "USD".to_string(),
                targets: vec![],
            })
            .await;
        assert_eq!(result.failure_kind(), Some(FailureKind::InvalidInput));
        assert_eq!(rates.calls.load(Ordering::SeqCst), 0);
    }
}
