//! Shared HTTP plumbing for the adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::SourceError;

/// Build the client shared by all adapters.
///
/// The timeout bounds every single request, connect included.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request and reject non-success statuses.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, SourceError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        debug!("Upstream {} answered {}", response.url(), status);
        return Err(SourceError::Status {
            code: status.as_u16(),
        });
    }

    Ok(response)
}

/// Send a request and return the body as text.
pub(crate) async fn get_text(request: RequestBuilder) -> Result<String, SourceError> {
    let response = send(request).await?;
    Ok(response.text().await?)
}

/// Send a request and decode the body as JSON.
///
/// Decoding happens after the body is fully read so that a malformed body is
/// classified as a parse failure, not a transport failure.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, SourceError> {
    let body = get_text(request).await?;
    Ok(serde_json::from_str(&body)?)
}
