use std::time::Duration;

use daybrief_sources::{Endpoint, SourcesConfig};

pub struct Config {
    pub sources: SourcesConfig,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset or blank keys fall
    /// back to the library defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut sources = SourcesConfig::default();

        let endpoint = |current: &Endpoint, url_key: &str, api_key: Option<String>| {
            let mut endpoint = match var(url_key) {
                Some(url) => Endpoint::new(url),
                None => current.clone(),
            };
            if let Some(key) = api_key {
                endpoint = endpoint.with_api_key(key);
            }
            endpoint
        };

        // api-ninjas serves both quotes and crypto prices with one key
        let ninjas_key = var("DAYBRIEF_API_NINJAS_KEY");

        sources.news = endpoint(&sources.news, "DAYBRIEF_NEWS_URL", var("DAYBRIEF_NEWS_API_KEY"));
        sources.horoscope = endpoint(&sources.horoscope, "DAYBRIEF_HOROSCOPE_URL", None);
        sources.history = endpoint(&sources.history, "DAYBRIEF_HISTORY_URL", None);
        sources.weather = endpoint(
            &sources.weather,
            "DAYBRIEF_WEATHER_URL",
            var("DAYBRIEF_WEATHER_API_KEY"),
        );
        sources.quote = endpoint(&sources.quote, "DAYBRIEF_QUOTE_URL", ninjas_key.clone());
        sources.exchange_rates =
            endpoint(&sources.exchange_rates, "DAYBRIEF_EXCHANGE_RATES_URL", None);
        sources.fact = endpoint(&sources.fact, "DAYBRIEF_FACT_URL", None);
        sources.crypto = endpoint(&sources.crypto, "DAYBRIEF_CRYPTO_URL", ninjas_key);

        if let Some(ms) = var("DAYBRIEF_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            sources.timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = var("DAYBRIEF_ADAPTER_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            sources.adapter_timeout = Duration::from_millis(ms);
        }
        if let Some(agent) = var("DAYBRIEF_USER_AGENT") {
            sources.user_agent = agent;
        }

        let defaults = &mut sources.defaults;
        if let Some(sign) = var("DAYBRIEF_SIGN") {
            defaults.horoscope_sign = sign;
        }
        if let Some(city) = var("DAYBRIEF_CITY") {
            defaults.city = city;
        }
        if let Some(symbol) = var("DAYBRIEF_CRYPTO_SYMBOL") {
            defaults.crypto_symbol = symbol;
        }
        if let Some(currency) = var("DAYBRIEF_CURRENCY") {
            defaults.secondary_currency = currency.to_uppercase();
        }
        if let Some(base) = var("DAYBRIEF_RATE_BASE") {
            defaults.rate_base = base.to_uppercase();
        }
        if let Some(targets) = var("DAYBRIEF_RATE_TARGETS") {
            defaults.rate_targets = targets
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(category) = var("DAYBRIEF_QUOTE_CATEGORY") {
            defaults.quote_category = category;
        }
        if let Some(country) = var("DAYBRIEF_NEWS_COUNTRY") {
            defaults.news_country = country;
        }

        let log_format = var("DAYBRIEF_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Self {
            sources,
            log_format,
        }
    }
}
