//! LiveProof Rust SDK
//!
//! Typed client for the LiveProof verification service.
//!
//! # Example
//!
//! ```no_run
//! use liveproof_sdk::{ClientConfig, LiveProofClient};
//! use liveproof_domain::{VerifyMode, VerifyRequest};
//!
//! # async fn run() -> Result<(), liveproof_sdk::SdkError> {
//! let client = LiveProofClient::new(ClientConfig::from_env()?)?;
//!
//! let request = VerifyRequest::new("How do I use asyncio?", VerifyMode::Answer, None)
//!     .expect("valid request");
//! let session = client.verify(&request).await?;
//! println!("{} ({}%)", session.answer, session.score_percent());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;

pub use client::{HealthStatus, LiveProofClient, SessionRecord};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL};
pub use error::SdkError;
