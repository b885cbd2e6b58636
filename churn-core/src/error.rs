//! Error handling

use thiserror::Error;

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Failures surfaced by the inference operations.
///
/// Only the remote client produces these. The local path is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Connection refused, DNS failure or request timeout
    #[error("Inference service unavailable: {0}")]
    NetworkUnavailable(String),

    /// Non-2xx status or a body that did not match the contract
    #[error("{message}")]
    RemoteRejected {
        status: Option<u16>,
        message: String,
    },
}

impl InferenceError {
    /// Generic status-coded rejection, used when the server gave no message
    pub fn rejected(status: u16) -> Self {
        Self::RemoteRejected {
            status: Some(status),
            message: format!("API error {}", status),
        }
    }

    /// Body shape mismatch on an otherwise successful response
    pub fn malformed(status: u16, detail: impl std::fmt::Display) -> Self {
        tracing::debug!("Malformed response ({}): {}", status, detail);
        Self::rejected(status)
    }

    /// True when the failure came from the transport, not the server
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NetworkUnavailable(_) => None,
            Self::RemoteRejected { status, .. } => *status,
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());

        if err.is_decode() {
            tracing::debug!("Malformed response body: {}", err);
            return match status {
                Some(status) => Self::rejected(status),
                None => Self::RemoteRejected {
                    status: None,
                    message: "Malformed response from inference service".to_string(),
                },
            };
        }

        match status {
            Some(status) => Self::rejected(status),
            None => Self::NetworkUnavailable(err.to_string()),
        }
    }
}

/// Configuration errors (invalid values from env or CLI)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base address '{0}': must start with http:// or https://")]
    InvalidBaseAddress(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
