//! Quote of the day from API Ninjas.
//!
//! API documentation: https://api-ninjas.com/api/quotes

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue};
use crate::provider::{ResponseFormat, SourceAdapter};

/// Header carrying the API Ninjas credential
pub(crate) const API_KEY_HEADER: &str = "X-Api-Key";

const NO_QUOTE: &str = "No quote available.";
const FETCH_FAILED: &str = "Failed to fetch quote.";

#[derive(Debug, Deserialize)]
struct QuoteItem {
    quote: String,
    author: String,
}

pub struct QuoteAdapter {
    client: Client,
    endpoint: Endpoint,
    category: String,
}

impl QuoteAdapter {
    pub fn new(client: Client, endpoint: Endpoint, category: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            category: category.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for QuoteAdapter {
    fn name(&self) -> SourceName {
        SourceName::Quote
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::Empty => NO_QUOTE,
            _ => FETCH_FAILED,
        };
        SourceValue::Text(message.to_string())
    }

    async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
        let request = self
            .client
            .get(self.endpoint.url("/v1/quotes"))
            .header(API_KEY_HEADER, self.endpoint.key())
            .query(&[("category", self.category.as_str())]);

        let items: Vec<QuoteItem> = http::get_json(request).await?;
        let first = items.into_iter().next().ok_or(SourceError::Empty)?;

        Ok(SourceValue::Text(format!(
            "{} - {}",
            first.quote.trim(),
            first.author.trim()
        )))
    }
}
