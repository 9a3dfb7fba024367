//! Claim module - atomic assertions extracted from evidence

use crate::serde_defaults::null_as_default;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Position a claim takes relative to the question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    /// Evidence supports the claim
    Support,
    /// Evidence opposes the claim
    Oppose,
    /// No position
    Neutral,
}

impl Stance {
    /// Wire name of the stance
    pub fn as_str(&self) -> &'static str {
        match self {
            Stance::Support => "support",
            Stance::Oppose => "oppose",
            Stance::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "support" => Ok(Stance::Support),
            "oppose" => Ok(Stance::Oppose),
            "neutral" => Ok(Stance::Neutral),
            other => Err(format!("Unknown stance: {}", other)),
        }
    }
}

/// A claim's reference to one of the session's citations
///
/// Numbers are zero-based ordinals into the citation sequence; strings are
/// opaque identifiers compared against [`crate::Citation::key`]. Anything
/// else on the wire (fractions, integers beyond `i64`, nulls, nested
/// values) decodes as [`CitationRef::Unresolvable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CitationRef {
    /// Ordinal position
    Index(i64),
    /// Citation identifier
    Id(String),
    /// Reference that can never match a citation
    Unresolvable,
}

impl fmt::Display for CitationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationRef::Index(i) => write!(f, "#{}", i),
            CitationRef::Id(id) => f.write_str(id),
            CitationRef::Unresolvable => f.write_str("?"),
        }
    }
}

impl Serialize for CitationRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CitationRef::Index(i) => serializer.serialize_i64(*i),
            CitationRef::Id(id) => serializer.serialize_str(id),
            CitationRef::Unresolvable => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for CitationRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CitationRefVisitor)
    }
}

struct CitationRefVisitor;

impl<'de> Visitor<'de> for CitationRefVisitor {
    type Value = CitationRef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a citation ordinal or identifier")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(CitationRef::Unresolvable)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(CitationRef::Index(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(CitationRef::Unresolvable, CitationRef::Index))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(CitationRef::Unresolvable)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CitationRef::Id(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(CitationRef::Id(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CitationRef::Unresolvable)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CitationRef::Unresolvable)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(CitationRef::Unresolvable)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(CitationRef::Unresolvable)
    }
}

impl From<usize> for CitationRef {
    fn from(index: usize) -> Self {
        CitationRef::Index(index as i64)
    }
}

impl From<&str> for CitationRef {
    fn from(id: &str) -> Self {
        CitationRef::Id(id.to_string())
    }
}

/// An atomic assertion backed by citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier (unique within a session)
    pub id: String,

    /// Assertion text
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Optional stance; unrecognized values decode as absent
    #[serde(
        default,
        deserialize_with = "lenient_stance",
        skip_serializing_if = "Option::is_none"
    )]
    pub stance: Option<Stance>,

    /// References into the session's citations
    #[serde(default, deserialize_with = "null_as_default")]
    pub citation_ids: Vec<CitationRef>,

    /// Extraction confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Claim {
    /// Create a claim without stance or confidence
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        citation_ids: Vec<CitationRef>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            stance: None,
            citation_ids,
            confidence: None,
        }
    }

    /// Stance worth labelling (neutral is not shown)
    pub fn notable_stance(&self) -> Option<Stance> {
        self.stance.filter(|s| *s != Stance::Neutral)
    }
}

fn lenient_stance<'de, D>(deserializer: D) -> Result<Option<Stance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_citation_refs() {
        let json = r#"{"id": "cl-0", "text": "Claim", "citation_ids": [0, "src-2", 3]}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(
            claim.citation_ids,
            vec![
                CitationRef::Index(0),
                CitationRef::Id("src-2".to_string()),
                CitationRef::Index(3)
            ]
        );
    }

    #[test]
    fn test_numeric_string_stays_identifier() {
        let json = r#"{"id": "cl-0", "text": "Claim", "citation_ids": ["0"]}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.citation_ids, vec![CitationRef::Id("0".to_string())]);
    }

    #[test]
    fn test_out_of_range_refs_decode_as_unresolvable() {
        let json = r#"{"id": "c", "text": "t", "citation_ids": [18446744073709551615, 0, 1.0]}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(
            claim.citation_ids,
            vec![
                CitationRef::Unresolvable,
                CitationRef::Index(0),
                CitationRef::Unresolvable
            ]
        );
    }

    #[test]
    fn test_odd_ref_shapes_do_not_fail_the_claim() {
        let json = r#"{"id": "c", "text": "t", "citation_ids": [null, true, [1], {"id": 2}, -1]}"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.citation_ids.len(), 5);
        assert!(claim.citation_ids[..4]
            .iter()
            .all(|r| *r == CitationRef::Unresolvable));
        assert_eq!(claim.citation_ids[4], CitationRef::Index(-1));
    }

    #[test]
    fn test_refs_serialize_as_wire_values() {
        let claim = Claim::new(
            "c",
            "t",
            vec![CitationRef::Index(2), CitationRef::Id("src".into()), CitationRef::Unresolvable],
        );
        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["citation_ids"], serde_json::json!([2, "src", null]));
    }

    #[test]
    fn test_missing_citation_ids() {
        let claim: Claim = serde_json::from_str(r#"{"id": "cl-1", "text": "t"}"#).unwrap();
        assert!(claim.citation_ids.is_empty());

        let claim: Claim =
            serde_json::from_str(r#"{"id": "cl-1", "text": "t", "citation_ids": null}"#).unwrap();
        assert!(claim.citation_ids.is_empty());
    }

    #[test]
    fn test_unknown_stance_is_absent() {
        let claim: Claim =
            serde_json::from_str(r#"{"id": "c", "text": "t", "stance": "sideways"}"#).unwrap();
        assert!(claim.stance.is_none());

        let claim: Claim =
            serde_json::from_str(r#"{"id": "c", "text": "t", "stance": "Oppose"}"#).unwrap();
        assert_eq!(claim.stance, Some(Stance::Oppose));
    }

    #[test]
    fn test_notable_stance_hides_neutral() {
        let mut claim = Claim::new("c", "t", vec![]);
        claim.stance = Some(Stance::Neutral);
        assert!(claim.notable_stance().is_none());

        claim.stance = Some(Stance::Support);
        assert_eq!(claim.notable_stance(), Some(Stance::Support));
    }
}
