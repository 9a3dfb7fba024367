//! Verification session - one verify round trip

use crate::citation::Citation;
use crate::claim::Claim;
use crate::error::{InvalidRequest, MAX_QUESTION_CHARS, MAX_TOPIC_CHARS};
use crate::reliability::score_percent;
use crate::serde_defaults::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the user intends to do with the verified answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyMode {
    /// Answer only
    #[default]
    Answer,
    /// Answer and allow artifact generation
    Execute,
}

impl VerifyMode {
    /// Wire name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyMode::Answer => "answer",
            VerifyMode::Execute => "execute",
        }
    }
}

impl fmt::Display for VerifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "answer" => Ok(VerifyMode::Answer),
            "execute" => Ok(VerifyMode::Execute),
            other => Err(format!("Unknown mode: {} (expected answer|execute)", other)),
        }
    }
}

/// Body of `POST /verify`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyRequest {
    /// Question or task text
    pub question: String,
    /// Requested mode
    pub mode: VerifyMode,
    /// Optional topic used to group sessions for comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl VerifyRequest {
    /// Build a validated request
    ///
    /// The question and topic are trimmed; a blank topic is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use liveproof_domain::{VerifyMode, VerifyRequest};
    ///
    /// let req = VerifyRequest::new("  Q?  ", VerifyMode::Answer, Some("   ".into())).unwrap();
    /// assert_eq!(req.question, "Q?");
    /// assert!(req.topic.is_none());
    /// ```
    pub fn new(
        question: impl AsRef<str>,
        mode: VerifyMode,
        topic: Option<String>,
    ) -> Result<Self, InvalidRequest> {
        let question = question.as_ref().trim();
        if question.is_empty() {
            return Err(InvalidRequest::EmptyQuestion);
        }
        let question_chars = question.chars().count();
        if question_chars > MAX_QUESTION_CHARS {
            return Err(InvalidRequest::QuestionTooLong {
                actual: question_chars,
            });
        }

        let topic = topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(t) = &topic {
            let topic_chars = t.chars().count();
            if topic_chars > MAX_TOPIC_CHARS {
                return Err(InvalidRequest::TopicTooLong {
                    actual: topic_chars,
                });
            }
        }

        Ok(Self {
            question: question.to_string(),
            mode,
            topic,
        })
    }
}

/// Flat success body of `POST /verify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Server-assigned opaque identifier
    pub session_id: String,
    /// Distilled answer
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    /// Reliability score in [0, 1]
    pub reliability_score: f64,
    /// Extracted claims
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims: Vec<Claim>,
    /// Retrieved citations
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
    /// Server-side execution eligibility
    pub can_execute: bool,
    /// Follow-up question suggested when the score is too low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    /// Topic echoed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// One verification result held by the client
///
/// Immutable once created: a new verify produces a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationSession {
    /// Server-assigned opaque identifier
    pub session_id: String,
    /// Question asked
    pub question: String,
    /// Mode requested
    pub mode: VerifyMode,
    /// Topic (as echoed by the server, else as requested)
    pub topic: Option<String>,
    /// Distilled answer
    pub answer: String,
    /// Reliability score in [0, 1]
    pub reliability_score: f64,
    /// Ordered claims
    pub claims: Vec<Claim>,
    /// Ordered citations
    pub citations: Vec<Citation>,
    /// Server-side execution eligibility
    pub can_execute: bool,
    /// Suggested follow-up question
    pub next_question: Option<String>,
}

impl VerificationSession {
    /// Combine a request with the service's response
    pub fn from_response(request: &VerifyRequest, response: VerifyResponse) -> Self {
        Self {
            session_id: response.session_id,
            question: request.question.clone(),
            mode: request.mode,
            topic: response.topic.or_else(|| request.topic.clone()),
            answer: response.answer,
            reliability_score: response.reliability_score,
            claims: response.claims,
            citations: response.citations,
            can_execute: response.can_execute,
            next_question: response.next_question.filter(|q| !q.trim().is_empty()),
        }
    }

    /// Reliability score as a whole percentage
    pub fn score_percent(&self) -> i64 {
        score_percent(self.reliability_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::CitationRef;

    fn response_json() -> &'static str {
        r#"{
            "answer": "The answer is async/await.",
            "reliability_score": 0.75,
            "claims": [{"id": "cl-0", "text": "Claim", "stance": "neutral", "citation_ids": [0]}],
            "citations": [{"title": "Doc", "url": "https://x.com", "snippet": "Snippet"}],
            "session_id": "s1",
            "can_execute": true,
            "topic": "python"
        }"#
    }

    #[test]
    fn test_request_serialization_omits_absent_topic() {
        let req = VerifyRequest::new("Test?", VerifyMode::Answer, None).unwrap();
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"question":"Test?","mode":"answer"}"#);
    }

    #[test]
    fn test_request_serialization_with_topic() {
        let req = VerifyRequest::new("Q", VerifyMode::Answer, Some("python".into())).unwrap();
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"question":"Q","mode":"answer","topic":"python"}"#);
    }

    #[test]
    fn test_request_validation() {
        assert_eq!(
            VerifyRequest::new("   ", VerifyMode::Answer, None),
            Err(InvalidRequest::EmptyQuestion)
        );

        let long = "q".repeat(MAX_QUESTION_CHARS + 1);
        assert!(matches!(
            VerifyRequest::new(&long, VerifyMode::Answer, None),
            Err(InvalidRequest::QuestionTooLong { .. })
        ));

        let topic = "t".repeat(MAX_TOPIC_CHARS + 1);
        assert!(matches!(
            VerifyRequest::new("Q", VerifyMode::Execute, Some(topic)),
            Err(InvalidRequest::TopicTooLong { .. })
        ));

        let edge = "q".repeat(MAX_QUESTION_CHARS);
        assert!(VerifyRequest::new(&edge, VerifyMode::Answer, None).is_ok());
    }

    #[test]
    fn test_response_parsing() {
        let response: VerifyResponse = serde_json::from_str(response_json()).unwrap();
        assert_eq!(response.session_id, "s1");
        assert_eq!(response.claims[0].citation_ids, vec![CitationRef::Index(0)]);
        assert!(response.next_question.is_none());
    }

    #[test]
    fn test_minimal_response_parsing() {
        let json = r#"{"session_id": "s1", "answer": "", "reliability_score": 0, "claims": [], "citations": [], "can_execute": false}"#;
        let response: VerifyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.reliability_score, 0.0);
        assert!(!response.can_execute);
    }

    #[test]
    fn test_session_from_response() {
        let req = VerifyRequest::new("How?", VerifyMode::Execute, None).unwrap();
        let response: VerifyResponse = serde_json::from_str(response_json()).unwrap();
        let session = VerificationSession::from_response(&req, response);

        assert_eq!(session.question, "How?");
        assert_eq!(session.mode, VerifyMode::Execute);
        assert_eq!(session.topic.as_deref(), Some("python"));
        assert_eq!(session.score_percent(), 75);
        assert_eq!(session.citations.len(), 1);
    }

    #[test]
    fn test_session_topic_falls_back_to_request() {
        let req = VerifyRequest::new("Q", VerifyMode::Answer, Some("rust".into())).unwrap();
        let json = r#"{"session_id": "s2", "answer": "A", "reliability_score": 0.4, "can_execute": false, "next_question": ""}"#;
        let response: VerifyResponse = serde_json::from_str(json).unwrap();
        let session = VerificationSession::from_response(&req, response);

        assert_eq!(session.topic.as_deref(), Some("rust"));
        assert!(session.next_question.is_none());
        assert!(session.claims.is_empty());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("EXECUTE".parse::<VerifyMode>(), Ok(VerifyMode::Execute));
        assert!("other".parse::<VerifyMode>().is_err());
    }
}
