//! Gatekeeper error types

use liveproof_domain::ActionType;
use liveproof_sdk::SdkError;
use thiserror::Error;

/// Flow transitions the gate refuses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// A verify call is already outstanding
    #[error("A verification is already in progress")]
    VerifyInFlight,

    /// Nothing has been verified yet
    #[error("No verified session")]
    NoSession,

    /// The handle refers to a session that has since been replaced
    #[error("Session {0} is no longer the displayed session")]
    StaleSession(String),

    /// The ticket does not belong to the outstanding verify call
    #[error("Verification ticket does not match the outstanding request")]
    StaleTicket,

    /// The service did not clear the session for execution
    #[error("Execution not allowed: reliability {score:.2} is below threshold")]
    ExecutionNotPermitted {
        /// Session reliability score
        score: f64,
    },

    /// The same action is already executing
    #[error("Action {0} is already executing")]
    ActionInFlight(ActionType),
}

/// Errors from the flow's async drivers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Gate refused the transition
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Transport failure, propagated unchanged
    #[error(transparent)]
    Request(#[from] SdkError),
}

/// Errors that can occur while presenting an artifact
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Artifact type outside the contract
    #[error("Unsupported artifact type: {0}")]
    UnsupportedArtifactType(String),

    /// PDF payload is not valid base64
    #[error("Invalid PDF payload: {0}")]
    InvalidPayload(String),
}
