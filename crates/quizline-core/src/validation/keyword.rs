/// Keyword-overlap fallback.
///
/// Matches when any whitespace-delimited token of the normalized reference occurs as a
/// substring of the normalized candidate. Both inputs are expected to be normalized
/// already; no case folding happens here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordOverlap;

impl KeywordOverlap {
    /// Returns the first reference token found inside `candidate`, if any.
    pub fn first_match<'a>(&self, candidate: &str, reference: &'a str) -> Option<&'a str> {
        reference
            .split_whitespace()
            .find(|token| candidate.contains(token))
    }

    /// Returns `true` if any reference token occurs in `candidate`.
    pub fn matches(&self, candidate: &str, reference: &str) -> bool {
        self.first_match(candidate, reference).is_some()
    }
}
