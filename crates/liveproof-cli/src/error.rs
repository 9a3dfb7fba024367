//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before it was sent
    #[error("Invalid input: {0}")]
    InvalidRequest(#[from] liveproof_domain::InvalidRequest),

    /// Transport error, shown as the raw service message
    #[error("{0}")]
    Sdk(#[from] liveproof_sdk::SdkError),

    /// Flow refused a transition or a request failed
    #[error("{0}")]
    Flow(#[from] liveproof_gatekeeper::FlowError),

    /// Artifact could not be presented
    #[error("{0}")]
    Render(#[from] liveproof_gatekeeper::RenderError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// No displayed session
    #[error("No verified session. Use 'verify' first.")]
    NoSession,
}

impl From<liveproof_gatekeeper::GateError> for CliError {
    fn from(err: liveproof_gatekeeper::GateError) -> Self {
        CliError::Flow(err.into())
    }
}
