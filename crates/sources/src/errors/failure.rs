use serde::{Deserialize, Serialize};

/// Coarse classification of why a source produced no data.
///
/// This is the only error information that leaves an adapter. Callers use it
/// to decide how to render a fallback; it is never raised.
///
/// | Kind | Raised when |
/// |------|-------------|
/// | `InvalidInput` | Caller parameter rejected before any network call |
/// | `Network` | Connection failure or non-2xx status |
/// | `Timeout` | Request or adapter deadline expired |
/// | `Parse` | Body received but expected field/element missing or mistyped |
/// | `Empty` | Body well-formed but contains no usable items |
/// | `InvalidData` | Fields present but values unusable (e.g. non-positive price) |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    #[serde(rename = "network_error")]
    Network,
    Timeout,
    #[serde(rename = "parse_error")]
    Parse,
    #[serde(rename = "empty_result")]
    Empty,
    InvalidData,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::Network => "network_error",
            Self::Timeout => "timeout",
            Self::Parse => "parse_error",
            Self::Empty => "empty_result",
            Self::InvalidData => "invalid_data",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
