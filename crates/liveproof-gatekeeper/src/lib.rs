//! LiveProof Gatekeeper
//!
//! Decides when artifact generation is permitted and owns the client-side
//! verify/execute state machine.
//!
//! The Gatekeeper provides:
//! - The execution gate (server flag authoritative, threshold cross-check)
//! - `VerificationFlow`, the single owned state for one verification flow
//! - Artifact rendering (preformatted text vs. downloadable PDF)
//!
//! # Examples
//!
//! ```no_run
//! use liveproof_gatekeeper::{GateConfig, VerificationFlow};
//! use liveproof_domain::{ActionType, VerifyMode, VerifyRequest};
//! use liveproof_sdk::{ClientConfig, LiveProofClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LiveProofClient::new(ClientConfig::from_env()?)?;
//! let mut flow = VerificationFlow::new(GateConfig::default());
//!
//! let request = VerifyRequest::new("How do I pin a tokio version?", VerifyMode::Execute, None)?;
//! let handle = flow.verify(&client, request).await?;
//! if flow.can_trigger(&handle, ActionType::Config) {
//!     let result = flow.execute(&client, &handle, ActionType::Config).await?;
//!     println!("{}", result.artifact);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod artifact;
mod backend;
mod config;
mod error;
mod flow;
mod gate;

pub use artifact::{
    render, PdfDownload, RenderedArtifact, TextKind, PDF_CONTENT_TYPE, PDF_FILE_NAME,
};
pub use backend::VerificationBackend;
pub use config::GateConfig;
pub use error::{FlowError, GateError, RenderError};
pub use flow::{
    ActionStatus, ExecuteTicket, FlowState, SessionHandle, VerificationFlow, VerifyTicket,
};
pub use gate::{evaluate, GateDecision};
