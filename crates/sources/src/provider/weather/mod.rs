//! Current conditions from WeatherAPI.com.
//!
//! API documentation: https://www.weatherapi.com/docs/

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Endpoint;
use crate::errors::{FailureKind, SourceError};
use crate::http;
use crate::models::{SourceName, SourceParams, SourceValue};
use crate::provider::{ResponseFormat, SourceAdapter};

const INVALID_LOCATION: &str = "Invalid location.";
const FETCH_FAILED: &str = "Failed to fetch weather.";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
    humidity: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

pub struct WeatherAdapter {
    client: Client,
    endpoint: Endpoint,
}

impl WeatherAdapter {
    pub fn new(client: Client, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    fn location(params: &SourceParams) -> Result<&str, SourceError> {
        match params {
            SourceParams::Location(location) if !location.trim().is_empty() => {
                Ok(location.trim())
            }
            SourceParams::Location(_) => {
                Err(SourceError::InvalidInput("empty location".to_string()))
            }
            other => Err(SourceError::InvalidInput(format!(
                "weather expects a location, got {:?}",
                other
            ))),
        }
    }
}

#[async_trait]
impl SourceAdapter for WeatherAdapter {
    fn name(&self) -> SourceName {
        SourceName::Weather
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat::Json
    }

    fn fallback(&self, kind: FailureKind) -> SourceValue {
        let message = match kind {
            FailureKind::InvalidInput => INVALID_LOCATION,
            _ => FETCH_FAILED,
        };
        SourceValue::Text(message.to_string())
    }

    fn validate(&self, params: &SourceParams) -> Result<(), SourceError> {
        Self::location(params).map(|_| ())
    }

    async fn fetch_value(&self, params: &SourceParams) -> Result<SourceValue, SourceError> {
        let location = Self::location(params)?;

        let request = self
            .client
            .get(self.endpoint.url("/v1/current.json"))
            .query(&[("key", self.endpoint.key()), ("q", location), ("aqi", "no")]);

        let data: CurrentResponse = http::get_json(request).await?;
        let current = data.current;

        Ok(SourceValue::Text(format!(
            "{}: {}, {:.1}°C, Humidity: {:.0}%",
            location,
            current.condition.text.trim(),
            current.temp_c,
            current.humidity
        )))
    }
}
