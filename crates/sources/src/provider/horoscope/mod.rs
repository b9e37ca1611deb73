//! Daily horoscope scraped from horoscope.com.
//!
//! The sign is resolved to horoscope.com's numeric id before any request is
//! made; the text is the first paragraph inside `.main-horoscope`.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue, ZodiacSign};
use crate::provider::markup;
use crate::provider::{ResponseFormat, SourceAdapter};

const DAILY_PATH: &str = "/us/horoscopes/general/horoscope-general-daily-today.aspx";
const HOROSCOPE_SELECTOR: &str = ".main-horoscope p";

const INVALID_SIGN: &str = "Invalid sign.";
const FETCH_FAILED: &str = "Failed to fetch horoscope.";

pub struct HoroscopeAdapter {
    client: Client,
    endpoint: Endpoint,
    user_agent: String,
}

impl HoroscopeAdapter {
    pub fn new(client: Client, endpoint: Endpoint, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            user_agent: user_agent.into(),
        }
    }

    fn sign(params: &SourceParams) -> Result<ZodiacSign, SourceError> {
        match params {
            SourceParams::Sign(name) => name.parse(),
            other => Err(SourceError::InvalidInput(format!(
                "horoscope expects a sign, got {:?}",
                other
            ))),
        }
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[async_trait]
impl SourceAdapter for HoroscopeAdapter {
    fn name(&self) -> SourceName {
        SourceName::Horoscope
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Markup
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::InvalidInput => INVALID_SIGN,
            _ => FETCH_FAILED,
        };
        SourceValue::Text(message.to_string())
    }

    fn validate(&self, params: &SourceParams) -> Result<(), SourceError> {
        Self::sign(params).map(|_| ())
    }

    async fn fetch_value(&self, params: &SourceParams) -> Result<SourceValue, SourceError> {
        let sign = Self::sign(params)?;

        let request = self
            .client
            .get(self.endpoint.url(DAILY_PATH))
            .header(USER_AGENT, &self.user_agent)
            .query(&[("sign", sign.id())]);

        let body = http::get_text(request).await?;
        let text = markup::first_text(&body, HOROSCOPE_SELECTOR)?;

        if text.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(SourceValue::Text(capitalize_first(&text)))
    }
}
