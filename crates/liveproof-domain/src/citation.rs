//! Citation module - source documents backing claims

use crate::serde_defaults::null_as_default;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identity of a citation within a session
///
/// Either the identifier supplied by the service or, when absent, the first
/// 16 hex characters of the SHA-256 of the citation URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CitationKey(String);

impl CitationKey {
    /// Derive the content-hash key for a URL
    ///
    /// # Examples
    ///
    /// ```
    /// use liveproof_domain::CitationKey;
    ///
    /// let a = CitationKey::from_url("https://docs.python.org/3/library/asyncio.html");
    /// let b = CitationKey::from_url("https://docs.python.org/3/library/asyncio.html");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 16);
    /// ```
    pub fn from_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(16);
        Self(encoded)
    }

    /// Borrow the key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CitationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to a source document with a human-readable snippet
///
/// Citations are immutable once received and are addressed by their
/// position in the session's citation sequence or by [`Citation::key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Optional service-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Document title (may be empty)
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Document URL
    pub url: String,

    /// Excerpt supporting the claims
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,

    /// Publication timestamp as reported by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    /// Publisher name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl Citation {
    /// Create a citation with the mandatory fields
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            published_at: None,
            source_name: None,
        }
    }

    /// Stable key used to resolve string citation references
    pub fn key(&self) -> CitationKey {
        match &self.id {
            Some(id) if !id.is_empty() => CitationKey(id.clone()),
            _ => CitationKey::from_url(&self.url),
        }
    }

    /// Title for display, falling back to the URL
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"url": "https://example.com/doc"}"#;
        let citation: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(citation.title, "");
        assert_eq!(citation.snippet, "");
        assert!(citation.published_at.is_none());
        assert_eq!(citation.display_title(), "https://example.com/doc");
    }

    #[test]
    fn test_null_title_falls_back_to_url() {
        let json = r#"{"title": null, "url": "https://x.com", "snippet": "s"}"#;
        let citation: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(citation.display_title(), "https://x.com");
    }

    #[test]
    fn test_display_title_prefers_title() {
        let citation = Citation::new("Doc", "https://x.com", "Snippet");
        assert_eq!(citation.display_title(), "Doc");
    }

    #[test]
    fn test_key_uses_service_id_when_present() {
        let mut citation = Citation::new("Doc", "https://x.com", "");
        assert_eq!(citation.key(), CitationKey::from_url("https://x.com"));

        citation.id = Some("src-1".to_string());
        assert_eq!(citation.key().as_str(), "src-1");
    }

    #[test]
    fn test_key_differs_per_url() {
        let a = CitationKey::from_url("https://a.example");
        let b = CitationKey::from_url("https://b.example");
        assert_ne!(a, b);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_absent_id_not_serialized() {
        let citation = Citation::new("Doc", "https://x.com", "Snippet");
        let json = serde_json::to_string(&citation).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("published_at"));
    }
}
