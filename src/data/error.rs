use thiserror::Error;

use crate::domain::Asset;

/// Everything that can go wrong between issuing a request and having a
/// normalized, aligned result ready for the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Connection refused, timeout, body read failure
    #[error("network failure: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body parsed but a required field was missing or malformed
    #[error("unexpected response shape: {0}")]
    ResponseShape(String),

    /// Historical series for the assets cannot be laid side by side
    #[error("{asset} series misaligned with BTC: {detail}")]
    Misaligned { asset: Asset, detail: String },
}

impl FetchError {
    /// Short tag for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Status { .. } => "status",
            FetchError::ResponseShape(_) => "response-shape",
            FetchError::Misaligned { .. } => "misaligned",
        }
    }

    pub fn missing_field(what: impl Into<String>) -> Self {
        FetchError::ResponseShape(format!("missing {}", what.into()))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::ResponseShape(err.to_string());
        }
        match err.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::ResponseShape(err.to_string())
    }
}
