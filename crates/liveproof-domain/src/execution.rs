//! Execution contract - artifacts generated for verified sessions

use crate::serde_defaults::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact a user may request once the gate passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Code snippet built from the verified context
    CodeSnippet,
    /// PDF verification report
    PdfReport,
    /// Configuration file
    Config,
}

impl ActionType {
    /// All action types, in display order
    pub const ALL: [ActionType; 3] = [
        ActionType::CodeSnippet,
        ActionType::PdfReport,
        ActionType::Config,
    ];

    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CodeSnippet => "code_snippet",
            ActionType::PdfReport => "pdf_report",
            ActionType::Config => "config",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::CodeSnippet => "code snippet",
            ActionType::PdfReport => "pdf report",
            ActionType::Config => "config",
        }
    }

    /// Position within [`ActionType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            ActionType::CodeSnippet => 0,
            ActionType::PdfReport => 1,
            ActionType::Config => 2,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "code_snippet" | "code" => Ok(ActionType::CodeSnippet),
            "pdf_report" | "pdf" => Ok(ActionType::PdfReport),
            "config" => Ok(ActionType::Config),
            other => Err(format!(
                "Unknown action: {} (expected code_snippet|pdf_report|config)",
                other
            )),
        }
    }
}

/// Body of `POST /execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    /// Session the artifact is generated for
    pub session_id: String,
    /// Requested artifact
    pub action_type: ActionType,
}

/// Encoding of a returned artifact
///
/// Values outside the contract decode into [`ArtifactType::Unrecognized`]
/// so they can be reported instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactType {
    /// Plain-text source code
    Code,
    /// PDF encoded as base64 text
    PdfBase64,
    /// Plain-text configuration
    Config,
    /// Anything else the service sent
    Unrecognized(String),
}

impl ArtifactType {
    /// Wire name of the artifact type
    pub fn as_str(&self) -> &str {
        match self {
            ArtifactType::Code => "code",
            ArtifactType::PdfBase64 => "pdf_base64",
            ArtifactType::Config => "config",
            ArtifactType::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for ArtifactType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "code" => ArtifactType::Code,
            "pdf_base64" => ArtifactType::PdfBase64,
            "config" => ArtifactType::Config,
            _ => ArtifactType::Unrecognized(raw),
        }
    }
}

impl From<ArtifactType> for String {
    fn from(kind: ArtifactType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success body of `POST /execute`
///
/// Not cached: every request re-invokes the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Artifact payload (base64 text for PDFs, raw text otherwise)
    #[serde(default, deserialize_with = "null_as_default")]
    pub artifact: String,
    /// Encoding of `artifact`
    pub artifact_type: ArtifactType,
    /// Generation log lines
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<String>,
    /// Safety notes attached by the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub safety_notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_request_serialization() {
        let req = ExecuteRequest {
            session_id: "session-1".to_string(),
            action_type: ActionType::CodeSnippet,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"session_id":"session-1","action_type":"code_snippet"}"#
        );
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("code-snippet".parse::<ActionType>(), Ok(ActionType::CodeSnippet));
        assert_eq!("PDF_REPORT".parse::<ActionType>(), Ok(ActionType::PdfReport));
        assert_eq!("config".parse::<ActionType>(), Ok(ActionType::Config));
        assert!("shell".parse::<ActionType>().is_err());
    }

    #[test]
    fn test_action_indices_match_all() {
        for (i, action) in ActionType::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_result_parsing() {
        let json = r#"{"artifact": "print(1)", "artifact_type": "code", "logs": ["Generating"], "safety_notes": []}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.artifact, "print(1)");
        assert_eq!(result.artifact_type, ArtifactType::Code);
        assert_eq!(result.logs.len(), 1);
    }

    #[test]
    fn test_unrecognized_artifact_type_preserved() {
        let json = r#"{"artifact": "x", "artifact_type": "shell_script"}"#;
        let result: ExecutionResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.artifact_type,
            ArtifactType::Unrecognized("shell_script".to_string())
        );
        assert!(result.logs.is_empty());
        assert_eq!(serde_json::to_string(&result.artifact_type).unwrap(), r#""shell_script""#);
    }
}
