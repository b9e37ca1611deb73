//! "On this day" events scraped from onthisday.com.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue};
use crate::provider::markup;
use crate::provider::{ResponseFormat, SourceAdapter};

/// Maximum number of events returned
pub const MAX_EVENTS: usize = 5;

const EVENT_SELECTOR: &str = ".event";

const NO_EVENTS: &str = "No historical events available.";
const FETCH_FAILED: &str = "Failed to fetch historical events.";

pub struct HistoryAdapter {
    client: Client,
    endpoint: Endpoint,
    user_agent: String,
}

impl HistoryAdapter {
    pub fn new(client: Client, endpoint: Endpoint, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for HistoryAdapter {
    fn name(&self) -> SourceName {
        SourceName::History
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Markup
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::Empty => NO_EVENTS,
            _ => FETCH_FAILED,
        };
        SourceValue::List(vec![message.to_string()])
    }

    async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
        let request = self
            .client
            .get(self.endpoint.url("/"))
            .header(USER_AGENT, &self.user_agent);

        let body = http::get_text(request).await?;
        let events = markup::texts(&body, EVENT_SELECTOR, MAX_EVENTS)?;

        if events.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(SourceValue::List(events))
    }
}
