//! Verification service seam

use liveproof_domain::{ActionType, ExecutionResult, VerificationSession, VerifyRequest};
use liveproof_sdk::{LiveProofClient, SdkError};

/// Remote operations the flow drives
///
/// Implemented by [`LiveProofClient`]; tests substitute a scripted backend.
#[allow(async_fn_in_trait)]
pub trait VerificationBackend {
    /// Verify a question
    async fn verify(&self, request: &VerifyRequest) -> Result<VerificationSession, SdkError>;

    /// Generate an artifact for a session
    async fn execute(
        &self,
        session_id: &str,
        action_type: ActionType,
    ) -> Result<ExecutionResult, SdkError>;
}

impl VerificationBackend for LiveProofClient {
    async fn verify(&self, request: &VerifyRequest) -> Result<VerificationSession, SdkError> {
        LiveProofClient::verify(self, request).await
    }

    async fn execute(
        &self,
        session_id: &str,
        action_type: ActionType,
    ) -> Result<ExecutionResult, SdkError> {
        LiveProofClient::execute(self, session_id, action_type).await
    }
}
