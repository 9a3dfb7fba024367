//! Read-only projections over historical sessions

use crate::reliability::score_percent;
use crate::serde_defaults::null_as_default;
use serde::{Deserialize, Serialize};

/// One historical session sharing a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCompareEntry {
    /// Session identifier
    pub session_id: String,
    /// Question asked
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    /// Answer given
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    /// Reliability score (0 when the store has none)
    #[serde(default, deserialize_with = "null_as_default")]
    pub reliability_score: f64,
    /// Creation timestamp as stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Number of claims in the session
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims_count: u64,
}

impl TopicCompareEntry {
    /// Reliability score as a whole percentage
    pub fn score_percent(&self) -> i64 {
        score_percent(self.reliability_score)
    }

    /// First eight characters of the session id
    pub fn short_id(&self) -> String {
        self.session_id.chars().take(8).collect()
    }
}

/// Success body of `GET /topic/{topic}/compare`
///
/// Sessions arrive most recent first; the order is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicComparison {
    /// Topic compared
    pub topic: String,
    /// Matching sessions
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<TopicCompareEntry>,
    /// Server note (e.g. content store not configured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A source ranked by how many claims reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSource {
    /// Source URL
    pub url: String,
    /// Source title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Number of referencing claims
    #[serde(default, deserialize_with = "null_as_default")]
    pub citation_count: u64,
}

impl TopSource {
    /// Title for display, falling back to the URL
    pub fn display_title(&self) -> &str {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.url,
        }
    }
}

/// Success body of `GET /sources/top`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSources {
    /// Ranked sources, highest count first
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<TopSource>,
    /// Server note (e.g. content store not configured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_comparison() {
        let json = r#"{"topic": "python-asyncio", "sessions": []}"#;
        let cmp: TopicComparison = serde_json::from_str(json).unwrap();
        assert_eq!(cmp.topic, "python-asyncio");
        assert!(cmp.sessions.is_empty());
    }

    #[test]
    fn test_unconfigured_store_comparison() {
        let json = r#"{"topic": "t", "sessions": [], "message": "Sanity not configured; no compare data."}"#;
        let cmp: TopicComparison = serde_json::from_str(json).unwrap();
        assert!(cmp.message.is_some());
    }

    #[test]
    fn test_entry_with_nulls() {
        let json = r#"{"session_id": "0123456789abcdef", "question": "Q", "answer": "A",
                       "reliability_score": null, "created_at": null, "claims_count": null}"#;
        let entry: TopicCompareEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.score_percent(), 0);
        assert_eq!(entry.claims_count, 0);
        assert_eq!(entry.short_id(), "01234567");
    }

    #[test]
    fn test_top_source_title_fallback() {
        let json = r#"{"sources": [{"url": "https://x.com", "citation_count": 1}]}"#;
        let top: TopSources = serde_json::from_str(json).unwrap();
        assert_eq!(top.sources.len(), 1);
        assert_eq!(top.sources[0].display_title(), "https://x.com");
    }
}
