//! Claim-citation resolution
//!
//! Maps each claim's citation references onto the session's citations.
//! Ordinals index the citation sequence; identifiers match
//! [`Citation::key`]. Anything that does not resolve is dropped from the
//! result, never reported as an error.

use crate::citation::Citation;
use crate::claim::{CitationRef, Claim};

/// A claim together with the citations its references resolve to
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClaim<'a> {
    /// The claim
    pub claim: &'a Claim,
    /// Resolved citations, in reference order
    pub citations: Vec<&'a Citation>,
}

impl ResolvedClaim<'_> {
    /// Number of references that did not resolve
    pub fn unresolved_count(&self) -> usize {
        self.claim.citation_ids.len() - self.citations.len()
    }
}

/// Resolve one reference to a position in `citations`
///
/// # Examples
///
/// ```
/// use liveproof_domain::{resolve_reference, Citation, CitationRef};
///
/// let citations = vec![Citation::new("Doc", "https://x.com", "")];
/// assert_eq!(resolve_reference(&CitationRef::Index(0), &citations), Some(0));
/// assert_eq!(resolve_reference(&CitationRef::Index(1), &citations), None);
/// ```
pub fn resolve_reference(reference: &CitationRef, citations: &[Citation]) -> Option<usize> {
    match reference {
        CitationRef::Index(i) => usize::try_from(*i).ok().filter(|i| *i < citations.len()),
        CitationRef::Id(id) => citations.iter().position(|c| c.key().as_str() == id),
        CitationRef::Unresolvable => None,
    }
}

/// Resolve every reference of a single claim
pub fn resolve_claim<'a>(claim: &'a Claim, citations: &'a [Citation]) -> ResolvedClaim<'a> {
    let resolved = claim
        .citation_ids
        .iter()
        .filter_map(|r| resolve_reference(r, citations))
        .map(|i| &citations[i])
        .collect();

    ResolvedClaim {
        claim,
        citations: resolved,
    }
}

/// Resolve a whole claim graph, keeping claim order
pub fn resolve_claims<'a>(
    claims: &'a [Claim],
    citations: &'a [Citation],
) -> Vec<ResolvedClaim<'a>> {
    claims.iter().map(|c| resolve_claim(c, citations)).collect()
}
