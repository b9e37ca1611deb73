//! Adapter configuration.
//!
//! Credentials, base URLs and the request timeout are passed into each
//! adapter at construction. Nothing in this crate reads the environment.

use std::time::Duration;

use crate::models::Currency;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for one whole adapter call (crypto makes two requests)
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(20);

/// User agent sent by the scraping adapters
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Base URL and optional credential for one upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Join a path onto the base URL without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The credential, or an empty string when none is configured.
    ///
    /// Upstreams reject an empty key themselves; that is reported as a
    /// network failure rather than invalid input.
    pub fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

/// Parameters used for the default page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotDefaults {
    pub horoscope_sign: String,
    pub city: String,
    pub crypto_symbol: String,
    /// Currency the crypto price is converted into
    pub secondary_currency: Currency,
    pub rate_base: Currency,
    pub rate_targets: Vec<Currency>,
    pub quote_category: String,
    pub news_country: String,
}

impl Default for SnapshotDefaults {
    fn default() -> Self {
        Self {
            horoscope_sign: "sagittarius".to_string(),
            city: "New Delhi".to_string(),
            crypto_symbol: "TRXUSD".to_string(),
            secondary_currency: "INR".to_string(),
            rate_base: "USD".to_string(),
            rate_targets: vec!["EUR".to_string(), "INR".to_string(), "GBP".to_string()],
            quote_category: "inspirational".to_string(),
            news_country: "us".to_string(),
        }
    }
}

/// Everything the adapters need to talk to their upstreams.
#[derive(Clone, Debug)]
pub struct SourcesConfig {
    pub news: Endpoint,
    pub horoscope: Endpoint,
    pub history: Endpoint,
    pub weather: Endpoint,
    /// api-ninjas quotes endpoint
    pub quote: Endpoint,
    pub exchange_rates: Endpoint,
    pub fact: Endpoint,
    /// api-ninjas crypto price endpoint
    pub crypto: Endpoint,
    /// Bound on each HTTP request
    pub timeout: Duration,
    /// Bound on each adapter call as seen by the aggregator
    pub adapter_timeout: Duration,
    pub user_agent: String,
    pub defaults: SnapshotDefaults,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            news: Endpoint::new("https://newsapi.org"),
            horoscope: Endpoint::new("https://www.horoscope.com"),
            history: Endpoint::new("https://www.onthisday.com"),
            weather: Endpoint::new("https://api.weatherapi.com"),
            quote: Endpoint::new("https://api.api-ninjas.com"),
            exchange_rates: Endpoint::new("https://api.exchangerate-api.com"),
            fact: Endpoint::new("https://uselessfacts.jsph.pl"),
            crypto: Endpoint::new("https://api.api-ninjas.com"),
            timeout: DEFAULT_TIMEOUT,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            defaults: SnapshotDefaults::default(),
        }
    }
}

impl SourcesConfig {
    /// Point every endpoint at one base URL. Used to run against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        let endpoint = Endpoint::new(base_url);
        Self {
            news: endpoint.clone(),
            horoscope: endpoint.clone(),
            history: endpoint.clone(),
            weather: endpoint.clone(),
            quote: endpoint.clone(),
            exchange_rates: endpoint.clone(),
            fact: endpoint.clone(),
            crypto: endpoint,
            ..Self::default()
        }
    }
}
