//! LiveProof Domain Layer
//!
//! The verification-session contract shared between the client and the
//! external verification service. Everything here is plain data plus pure
//! functions; transport and presentation live in other crates.
//!
//! ## Key Concepts
//!
//! - **Citation**: a source document with a snippet, keyed by a stable hash
//! - **Claim**: an atomic assertion backed by zero or more citation references
//! - **VerificationSession**: one verify result (answer, score, claim graph)
//! - **Reliability threshold**: the fixed score artifact generation requires
//! - **ExecutionResult**: an artifact produced for a verified session

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod citation;
pub mod claim;
pub mod error;
pub mod execution;
pub mod history;
pub mod reliability;
pub mod resolver;
pub mod session;

mod serde_defaults;

// Re-exports for convenience
pub use citation::{Citation, CitationKey};
pub use claim::{CitationRef, Claim, Stance};
pub use error::InvalidRequest;
pub use execution::{ActionType, ArtifactType, ExecuteRequest, ExecutionResult};
pub use history::{TopSource, TopSources, TopicCompareEntry, TopicComparison};
pub use reliability::{meets_threshold, score_percent, RELIABILITY_THRESHOLD};
pub use resolver::{resolve_claim, resolve_claims, resolve_reference, ResolvedClaim};
pub use session::{VerificationSession, VerifyMode, VerifyRequest, VerifyResponse};
