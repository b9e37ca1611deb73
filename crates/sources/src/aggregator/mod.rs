//! Aggregator for building composite snapshots.
//!
//! The aggregator owns one adapter per source and, for a snapshot request:
//! - Invokes every requested adapter concurrently
//! - Bounds each adapter call with a deadline
//! - Records each outcome under its source name, independent of the others
//!
//! Dropping the future returned by [`Aggregator::snapshot`] drops every
//! in-flight adapter call with it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::config::{SnapshotDefaults, SourcesConfig};
use crate::errors::FailureKind;
use crate::fx::{ExchangeRateApiClient, RateProvider};
use crate::http;
use crate::models::{
    CompositeSnapshot, SnapshotRequest, SourceName, SourceParams, SourceResult, SourceValue,
};
use crate::provider::{
    CryptoAdapter, ExchangeRatesAdapter, FactAdapter, HistoryAdapter, HoroscopeAdapter,
    NewsAdapter, QuoteAdapter, SourceAdapter, WeatherAdapter,
};

/// Composes source adapters into snapshots.
pub struct Aggregator {
    adapters: HashMap<SourceName, Arc<dyn SourceAdapter>>,
    adapter_timeout: Duration,
    defaults: SnapshotDefaults,
}

impl Aggregator {
    /// Create an aggregator over the given adapters.
    ///
    /// When two adapters report the same [`SourceName`], the later one wins.
    ///
    /// # Arguments
    ///
    /// * `adapters` - One adapter per source
    /// * `adapter_timeout` - Deadline for each adapter call
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, adapter_timeout: Duration) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.name(), adapter))
            .collect();

        Self {
            adapters,
            adapter_timeout,
            defaults: SnapshotDefaults::default(),
        }
    }

    /// Replace the parameters used by [`full_snapshot`](Self::full_snapshot).
    pub fn with_defaults(mut self, defaults: SnapshotDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Wire the eight upstream adapters from configuration.
    ///
    /// All adapters share one HTTP client; the crypto adapter and the
    /// exchange-rates adapter share one rate helper.
    pub fn from_config(config: &SourcesConfig) -> Self {
        let client = http::build_client(config.timeout);
        let defaults = &config.defaults;

        let rates: Arc<dyn RateProvider> = Arc::new(ExchangeRateApiClient::new(
            client.clone(),
            config.exchange_rates.clone(),
        ));

        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(NewsAdapter::new(
                client.clone(),
                config.news.clone(),
                defaults.news_country.clone(),
            )),
            Arc::new(HoroscopeAdapter::new(
                client.clone(),
                config.horoscope.clone(),
                config.user_agent.clone(),
            )),
            Arc::new(HistoryAdapter::new(
                client.clone(),
                config.history.clone(),
                config.user_agent.clone(),
            )),
            Arc::new(WeatherAdapter::new(client.clone(), config.weather.clone())),
            Arc::new(QuoteAdapter::new(
                client.clone(),
                config.quote.clone(),
                defaults.quote_category.clone(),
            )),
            Arc::new(ExchangeRatesAdapter::new(
                rates.clone(),
                defaults.rate_base.clone(),
                defaults.rate_targets.clone(),
            )),
            Arc::new(FactAdapter::new(client.clone(), config.fact.clone())),
            Arc::new(CryptoAdapter::new(
                client,
                config.crypto.clone(),
                rates,
                defaults.secondary_currency.clone(),
            )),
        ];

        Self::new(adapters, config.adapter_timeout).with_defaults(defaults.clone())
    }

    /// Sources this aggregator has an adapter for.
    pub fn sources(&self) -> Vec<SourceName> {
        let mut names: Vec<SourceName> = self.adapters.keys().copied().collect();
        names.sort();
        names
    }

    /// Build a snapshot for the requested sources.
    ///
    /// The returned snapshot has exactly the requested keys. A source with no
    /// registered adapter is recorded as invalid input; an adapter that
    /// misses its deadline is recorded as a timeout with its own fallback.
    pub async fn snapshot(&self, request: &SnapshotRequest) -> CompositeSnapshot {
        let calls = request
            .iter()
            .map(|(name, params)| async move { (name, self.run(name, params).await) });

        let snapshot = CompositeSnapshot::from_results(join_all(calls).await);

        let failed: Vec<&'static str> = snapshot.failures().map(|name| name.as_str()).collect();
        if failed.is_empty() {
            info!("Snapshot of {} sources complete", snapshot.len());
        } else {
            warn!(
                "Snapshot of {} sources complete, {} failed: {}",
                snapshot.len(),
                failed.len(),
                failed.join(", ")
            );
        }

        snapshot
    }

    /// Snapshot of every source with the default parameters.
    pub async fn full_snapshot(&self) -> CompositeSnapshot {
        self.snapshot(&SnapshotRequest::full(&self.defaults)).await
    }

    /// Horoscope for a caller-supplied sign (case-insensitive).
    pub async fn horoscope(&self, sign: &str) -> SourceResult {
        self.run(SourceName::Horoscope, &SourceParams::Sign(sign.to_string()))
            .await
    }

    async fn run(&self, name: SourceName, params: &SourceParams) -> SourceResult {
        let Some(adapter) = self.adapters.get(&name) else {
            warn!("No adapter registered for source '{}'", name);
            return SourceResult::failed(
                FailureKind::InvalidInput,
                SourceValue::Text(format!("No {} source configured.", name)),
            );
        };

        match tokio::time::timeout(self.adapter_timeout, adapter.fetch(params)).await {
            Ok(result) => {
                debug!(
                    "Source '{}' finished: {}",
                    name,
                    result.failure_kind().map_or("ok", |kind| kind.as_str())
                );
                result
            }
            Err(_) => {
                warn!(
                    "Source '{}' exceeded {:?}, abandoning",
                    name, self.adapter_timeout
                );
                adapter.failure(FailureKind::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use crate::provider::ResponseFormat;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockAdapter {
        name: SourceName,
        delay: Duration,
        should_fail: bool,
        call_count: AtomicUsize,
    }

    impl MockAdapter {
        fn new(name: SourceName, should_fail: bool) -> Self {
            Self {
                name,
                delay: Duration::ZERO,
                should_fail,
                call_count: AtomicUsize::new(0),
            }
        }

        fn slow(name: SourceName, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(name, false)
            }
        }
    }

    #[async_trait]
    impl SourceAdapter for MockAdapter {
        fn name(&self) -> SourceName {
            self.name
        }

        fn format(&self) -> ResponseFormat {
            ResponseFormat::Json
        }

        fn fallback(&self, _kind: FailureKind) -> SourceValue {
            SourceValue::Text(format!("Failed to fetch {}.", self.name))
        }

        fn validate(&self, _params: &SourceParams) -> Result<(), SourceError> {
            Ok(())
        }

        async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.should_fail {
                Err(SourceError::Network("Mock failure".to_string()))
            } else {
                Ok(SourceValue::Text(format!("{} data", self.name)))
            }
        }
    }

    fn request(names: &[SourceName]) -> SnapshotRequest {
        names
            .iter()
            .map(|name| (*name, SourceParams::None))
            .collect()
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_other_sources() {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(MockAdapter::new(SourceName::News, true)),
            Arc::new(MockAdapter::new(SourceName::Fact, false)),
        ];
        let aggregator = Aggregator::new(adapters, Duration::from_secs(5));

        let snapshot = aggregator
            .snapshot(&request(&[SourceName::News, SourceName::Fact]))
            .await;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get(SourceName::News).unwrap().failure_kind(),
            Some(FailureKind::Network)
        );
        assert_eq!(
            snapshot.value(SourceName::Fact).and_then(SourceValue::as_text),
            Some("fact data")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_adapter_times_out_alone() {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(MockAdapter::slow(SourceName::Weather, Duration::from_secs(60))),
            Arc::new(MockAdapter::new(SourceName::Quote, false)),
        ];
        let aggregator = Aggregator::new(adapters, Duration::from_secs(2));

        let snapshot = aggregator
            .snapshot(&request(&[SourceName::Weather, SourceName::Quote]))
            .await;

        let weather = snapshot.get(SourceName::Weather).unwrap();
        assert_eq!(weather.failure_kind(), Some(FailureKind::Timeout));
        assert_eq!(weather.display_value().as_text(), Some("Failed to fetch weather."));
        assert!(snapshot.get(SourceName::Quote).unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_unregistered_source_keeps_its_key() {
        let adapters: Vec<Arc<dyn SourceAdapter>> =
            vec![Arc::new(MockAdapter::new(SourceName::Fact, false))];
        let aggregator = Aggregator::new(adapters, Duration::from_secs(5));

        let snapshot = aggregator
            .snapshot(&request(&[SourceName::Fact, SourceName::Crypto]))
            .await;

        let keys: Vec<SourceName> = snapshot.keys().collect();
        assert_eq!(keys, vec![SourceName::Fact, SourceName::Crypto]);
        assert_eq!(
            snapshot.get(SourceName::Crypto).unwrap().failure_kind(),
            Some(FailureKind::InvalidInput)
        );
    }

    #[tokio::test]
    async fn test_only_requested_adapters_are_called() {
        let news = Arc::new(MockAdapter::new(SourceName::News, false));
        let fact = Arc::new(MockAdapter::new(SourceName::Fact, false));
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![news.clone(), fact.clone()];
        let aggregator = Aggregator::new(adapters, Duration::from_secs(5));

        let snapshot = aggregator.snapshot(&request(&[SourceName::Fact])).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(news.call_count.load(Ordering::SeqCst), 0);
        assert_eq!(fact.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_request_gives_empty_snapshot() {
        let aggregator = Aggregator::new(vec![], Duration::from_secs(5));
        let snapshot = aggregator.snapshot(&SnapshotRequest::new()).await;
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_from_config_registers_every_source() {
        let aggregator = Aggregator::from_config(&SourcesConfig::default());
        assert_eq!(aggregator.sources(), SourceName::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_invalid_sign_via_aggregator() {
        let aggregator =
            Aggregator::from_config(&SourcesConfig::with_base_url("http://127.0.0.1:9"));
        let result = aggregator.horoscope("not-a-sign").await;
        assert_eq!(result.failure_kind(), Some(FailureKind::InvalidInput));
        assert_eq!(result.display_value().as_text(), Some("Invalid sign."));
    }
}
