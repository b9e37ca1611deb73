//! NewsAPI top headlines.
//!
//! Calls `/v2/top-headlines` and returns the titles of at most
//! [`MAX_HEADLINES`] articles. API documentation: https://newsapi.org/docs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue};
use crate::provider::{ResponseFormat, SourceAdapter};

/// Maximum number of headlines returned
pub const MAX_HEADLINES: usize = 10;

const NO_NEWS: &str = "No news available at the moment.";
const FETCH_FAILED: &str = "Failed to fetch news.";

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
}

pub struct NewsAdapter {
    client: Client,
    endpoint: Endpoint,
    country: String,
}

impl NewsAdapter {
    pub fn new(client: Client, endpoint: Endpoint, country: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            country: country.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for NewsAdapter {
    fn name(&self) -> SourceName {
        SourceName::News
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::Empty => NO_NEWS,
            _ => FETCH_FAILED,
        };
        SourceValue::List(vec![message.to_string()])
    }

    async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
        let request = self
            .client
            .get(self.endpoint.url("/v2/top-headlines"))
            .query(&[
                ("country", self.country.as_str()),
                ("apiKey", self.endpoint.key()),
            ]);

        let page: HeadlinesResponse = http::get_json(request).await?;

        let titles: Vec<String> = page
            .articles
            .into_iter()
            .take(MAX_HEADLINES)
            .map(|article| article.title.trim().to_string())
            .collect();

        if titles.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(SourceValue::List(titles))
    }
}
