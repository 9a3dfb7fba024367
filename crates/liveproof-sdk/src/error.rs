//! Error types for the LiveProof SDK.

use thiserror::Error;

/// SDK operation errors
///
/// Every remote operation fails with [`SdkError::RequestFailed`]; its
/// display output is exactly the carried message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// Remote call failed: raw response body for non-success statuses,
    /// otherwise the transport's failure reason
    #[error("{0}")]
    RequestFailed(String),

    /// API origin could not be used as a base URL
    #[error("Invalid API origin: {0}")]
    InvalidOrigin(String),
}

impl SdkError {
    /// Message carried by the error
    pub fn message(&self) -> &str {
        match self {
            SdkError::RequestFailed(msg) | SdkError::InvalidOrigin(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::RequestFailed(e.to_string())
    }
}
