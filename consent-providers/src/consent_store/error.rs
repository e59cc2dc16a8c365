//! Enumerates errors related to the consent store.

use thiserror::Error;

use crate::{common_models::consent::ConsentId, http_client};

#[derive(Debug, Error)]
pub enum ConsentStoreError {
    #[error("Request rejected with status {status}: `{message}`")]
    Rejected { status: u16, message: String },
    #[error("Consent not found: `{0}`")]
    NotFound(ConsentId),
    #[error("Invalid consent record `{id}`: {reason}")]
    InvalidRecord { id: String, reason: String },
    #[error("Invalid response: `{0}`")]
    InvalidResponse(String),
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Url error: `{0}`")]
    Url(#[from] url::ParseError),
}

impl From<http_client::Error> for ConsentStoreError {
    fn from(value: http_client::Error) -> Self {
        match value {
            http_client::Error::StatusCodeIsError { status, message } => Self::Rejected {
                status: status.0,
                message: message.unwrap_or_else(|| format!("HTTP status {status}")),
            },
            http_client::Error::JsonError(err) => Self::InvalidResponse(err.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}
