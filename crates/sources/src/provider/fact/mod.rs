//! Random fact from uselessfacts.jsph.pl.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue};
use crate::provider::{ResponseFormat, SourceAdapter};

const NO_FACT: &str = "No fact available.";
const FETCH_FAILED: &str = "Failed to fetch fact.";

#[derive(Debug, Deserialize)]
struct FactResponse {
    text: Option<String>,
}

pub struct FactAdapter {
    client: Client,
    endpoint: Endpoint,
}

impl FactAdapter {
    pub fn new(client: Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl SourceAdapter for FactAdapter {
    fn name(&self) -> SourceName {
        SourceName::Fact
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::Empty => NO_FACT,
            _ => FETCH_FAILED,
        };
        SourceValue::Text(message.to_string())
    }

    async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
        let request = self
            .client
            .get(self.endpoint.url("/random.json"))
            .query(&[("language", "en")]);

        let data: FactResponse = http::get_json(request).await?;

        match data.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(SourceValue::Text(text.to_string())),
            _ => Err(SourceError::Empty),
        }
    }
}
