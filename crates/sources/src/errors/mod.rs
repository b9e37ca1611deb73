//! Error types and failure classification for the sources crate.
//!
//! This module provides:
//! - [`SourceError`]: step-level errors raised inside an adapter
//! - [`FailureKind`]: the coarse classification that survives the adapter boundary

mod failure;

pub use failure::FailureKind;

use thiserror::Error;

/// Errors that can occur while fetching from a single source.
///
/// These never leave an adapter. [`SourceAdapter::fetch`](crate::provider::SourceAdapter::fetch)
/// converts them into a failed [`SourceResult`](crate::models::SourceResult) using
/// [`kind`](Self::kind).
#[derive(Error, Debug)]
pub enum SourceError {
    /// Caller-supplied parameter was not recognized.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request could not be sent or the connection broke.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status code.
    #[error("Unexpected status: {code}")]
    Status {
        /// HTTP status code returned by the upstream
        code: u16,
    },

    /// The request or the whole adapter call exceeded its deadline.
    #[error("Timed out")]
    Timeout,

    /// The body could not be decoded or an expected field/element is missing.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The body was well-formed but held nothing usable.
    #[error("Empty response")]
    Empty,

    /// Fields were present but their values are unusable.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl SourceError {
    /// Returns the coarse failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use daybrief_sources::errors::{FailureKind, SourceError};
    ///
    /// let error = SourceError::Status { code: 503 };
    /// assert_eq!(error.kind(), FailureKind::Network);
    ///
    /// let error = SourceError::Parse("missing field `title`".to_string());
    /// assert_eq!(error.kind(), FailureKind::Parse);
    /// ```
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput(_) => FailureKind::InvalidInput,
            Self::Network(_) | Self::Status { .. } => FailureKind::Network,
            Self::Timeout => FailureKind::Timeout,
            Self::Parse(_) => FailureKind::Parse,
            Self::Empty => FailureKind::Empty,
            Self::InvalidData(_) => FailureKind::InvalidData,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                code: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
