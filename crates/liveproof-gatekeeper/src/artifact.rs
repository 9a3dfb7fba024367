//! Artifact presentation
//!
//! Code and config artifacts are shown verbatim as preformatted text. PDF
//! artifacts become a download whose payload stays base64 until saved.

use crate::error::RenderError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use liveproof_domain::{ArtifactType, ExecutionResult};

/// Suggested file name for PDF downloads
pub const PDF_FILE_NAME: &str = "liveproof-report.pdf";

/// Content type for PDF downloads
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Kind of preformatted artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Source code
    Code,
    /// Configuration file
    Config,
}

/// A downloadable PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDownload {
    /// Suggested file name
    pub file_name: &'static str,
    /// MIME type
    pub content_type: &'static str,
    /// Base64 payload as returned by the service
    pub payload: String,
}

impl PdfDownload {
    /// `data:` URI embedding the payload
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.payload)
    }

    /// Decoded PDF bytes
    pub fn decode(&self) -> Result<Vec<u8>, RenderError> {
        STANDARD
            .decode(self.payload.trim())
            .map_err(|e| RenderError::InvalidPayload(e.to_string()))
    }
}

/// How an artifact is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedArtifact {
    /// Literal text, never interpreted as markup
    Preformatted {
        /// Code or config
        kind: TextKind,
        /// Artifact text, unchanged
        text: String,
    },
    /// File download
    Download(PdfDownload),
}

/// Choose the presentation for an execution result
pub fn render(result: &ExecutionResult) -> Result<RenderedArtifact, RenderError> {
    match &result.artifact_type {
        ArtifactType::Code => Ok(RenderedArtifact::Preformatted {
            kind: TextKind::Code,
            text: result.artifact.clone(),
        }),
        ArtifactType::Config => Ok(RenderedArtifact::Preformatted {
            kind: TextKind::Config,
            text: result.artifact.clone(),
        }),
        ArtifactType::PdfBase64 => Ok(RenderedArtifact::Download(PdfDownload {
            file_name: PDF_FILE_NAME,
            content_type: PDF_CONTENT_TYPE,
            payload: result.artifact.clone(),
        })),
        ArtifactType::Unrecognized(other) => {
            Err(RenderError::UnsupportedArtifactType(other.clone()))
        }
    }
}
