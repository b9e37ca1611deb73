//! Rate conversion helper.
//!
//! Fetches current exchange rates for a base currency and keeps only the
//! requested target codes. Used directly by the exchange-rates source and
//! by the crypto source to convert its USD price.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Endpoint;
use crate::errors::SourceError;
use crate::http;
use crate::models::{Currency, ExchangeRateTable};

/// Source of exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch rates for `targets` relative to `base`.
    ///
    /// Targets missing from the upstream response, or with a non-numeric or
    /// non-positive rate, are left out of the table.
    async fn try_rates(
        &self,
        base: &str,
        targets: &[Currency],
    ) -> Result<ExchangeRateTable, SourceError>;

    /// Like [`try_rates`](Self::try_rates) but an upstream failure yields an
    /// empty table instead of an error.
    async fn rates(&self, base: &str, targets: &[Currency]) -> ExchangeRateTable {
        match self.try_rates(base, targets).await {
            Ok(table) => table,
            Err(e) => {
                debug!("Error fetching exchange rates for {}: {}", base, e);
                ExchangeRateTable::new(base)
            }
        }
    }
}

/// Response from /v4/latest/{base}
#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, serde_json::Value>,
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Client for api.exchangerate-api.com (v4, no key required).
pub struct ExchangeRateApiClient {
    client: Client,
    endpoint: Endpoint,
}

impl ExchangeRateApiClient {
    pub fn new(client: Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    async fn try_rates(
        &self,
        base: &str,
        targets: &[Currency],
    ) -> Result<ExchangeRateTable, SourceError> {
        let base = base.trim().to_uppercase();
        if !is_currency_code(&base) {
            return Err(SourceError::InvalidInput(format!(
                "invalid base currency: {:?}",
                base
            )));
        }

        let mut table = ExchangeRateTable::new(base.as_str());
        if targets.is_empty() {
            return Ok(table);
        }

        let url = self
            .endpoint
            .url(&format!("/v4/latest/{}", urlencoding::encode(&base)));
        let latest: LatestResponse = http::get_json(self.client.get(url)).await?;

        for target in targets {
            let code = target.trim().to_uppercase();
            match latest.rates.get(&code).and_then(serde_json::Value::as_f64) {
                Some(rate) => {
                    if !table.insert(&code, rate) {
                        debug!("Dropping unusable {}/{} rate: {}", base, code, rate);
                    }
                }
                None => debug!("No {}/{} rate in response", base, code),
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn codes(codes: &[&str]) -> Vec<Currency> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    async fn server_with_rates() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "base": "USD",
                "date": "2023-11-14",
                "time_last_updated": 1699920001,
                "rates": {"USD": 1, "EUR": 0.92, "INR": 83.0, "GBP": 0.79, "BAD": "n/a", "ZER": 0}
            })))
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> ExchangeRateApiClient {
        ExchangeRateApiClient::new(Client::new(), Endpoint::new(server.uri()))
    }

    #[tokio::test]
    async fn test_absent_target_is_omitted() {
        let server = server_with_rates().await;
        let table = client(&server).rates("USD", &codes(&["EUR", "XXX"])).await;

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("EUR"), Some(0.92));
        assert!(!table.contains("XXX"));
    }

    #[tokio::test]
    async fn test_lowercase_codes_and_unusable_values() {
        let server = server_with_rates().await;
        let table = client(&server)
            .rates("usd", &codes(&["inr", "gbp", "BAD", "ZER"]))
            .await;

        assert_eq!(table.base(), "USD");
        assert_eq!(table.get("INR"), Some(83.0));
        assert_eq!(table.get("GBP"), Some(0.79));
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_empty_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client(&server);
        let table = client.rates("USD", &codes(&["EUR"])).await;
        assert!(table.is_empty());

        let err = client.try_rates("USD", &codes(&["EUR"])).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { code: 500 }));
    }

    #[tokio::test]
    async fn test_invalid_base_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .try_rates("US DOLLAR", &codes(&["EUR"]))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }
}
