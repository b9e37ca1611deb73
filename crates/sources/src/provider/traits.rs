//! Source adapter trait definitions.
//!
//! This module defines the `SourceAdapter` trait that every upstream
//! integration implements.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{FailureKind, SourceError};
use crate::models::{SourceName, SourceParams, SourceResult, SourceValue};

/// How an adapter reads its upstream response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseFormat {
    /// Structured body decoded into named fields.
    Json,
    /// HTML scraped by selecting known elements.
    Markup,
}

/// Trait for snapshot sources.
///
/// Implementors provide the fallible pieces (`validate`, `fetch_value`) and
/// the source-specific fallback placeholders. The provided [`fetch`](Self::fetch)
/// composes them and is the only entry point the aggregator uses; it never
/// returns an error.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use daybrief_sources::provider::{ResponseFormat, SourceAdapter};
///
/// struct Motd;
///
/// #[async_trait]
/// impl SourceAdapter for Motd {
///     fn name(&self) -> SourceName {
///         SourceName::Fact
///     }
///
///     fn format(&self) -> ResponseFormat {
///         ResponseFormat::Json
///     }
///
///     fn fallback(&self, _kind: FailureKind) -> SourceValue {
///         SourceValue::Text("Failed to fetch motd.".to_string())
///     }
///
///     async fn fetch_value(&self, _params: &SourceParams) -> Result<SourceValue, SourceError> {
///         Ok(SourceValue::Text("hello".to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Snapshot key this adapter fills.
    fn name(&self) -> SourceName;

    /// Whether the upstream is parsed as structured data or markup.
    fn format(&self) -> ResponseFormat;

    /// Placeholder shown in place of data for the given failure.
    fn fallback(&self, kind: FailureKind) -> SourceValue;

    /// Reject parameters that can be judged invalid without a network call.
    ///
    /// Default accepts only [`SourceParams::None`].
    fn validate(&self, params: &SourceParams) -> Result<(), SourceError> {
        match params {
            SourceParams::None => Ok(()),
            other => Err(SourceError::InvalidInput(format!(
                "{} takes no parameters, got {:?}",
                self.name(),
                other
            ))),
        }
    }

    /// Perform the upstream call and normalize the response.
    ///
    /// Only called after [`validate`](Self::validate) accepted `params`.
    async fn fetch_value(&self, params: &SourceParams) -> Result<SourceValue, SourceError>;

    /// Fetch from the source, converting every error into a fallback.
    async fn fetch(&self, params: &SourceParams) -> SourceResult {
        if let Err(e) = self.validate(params) {
            debug!("Rejected {} request before fetching: {}", self.name(), e);
            return self.failure(e.kind());
        }

        match self.fetch_value(params).await {
            Ok(value) => SourceResult::Ok(value),
            Err(e) => {
                debug!(
                    "Error fetching {} ({:?} source): {}",
                    self.name(),
                    self.format(),
                    e
                );
                self.failure(e.kind())
            }
        }
    }

    /// Failed result carrying this adapter's placeholder.
    fn failure(&self, kind: FailureKind) -> SourceResult {
        SourceResult::failed(kind, self.fallback(kind))
    }
}
