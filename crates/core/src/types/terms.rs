//! The set of search terms derived from one ingredient query.

use std::collections::BTreeSet;

use serde::Serialize;

/// Lowercase, deduplicated search terms for a single request.
///
/// Iteration is in lexicographic order, so anything derived from the set
/// (query placeholders, bound values, `matched_ingredients`) is deterministic
/// for a given input.
///
/// ```
/// use larder_core::SearchTerms;
///
/// let terms: SearchTerms = ["Eggs", "flour", "eggs", ""].into_iter().collect();
/// assert_eq!(terms.len(), 2);
/// assert!(terms.contains("eggs"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchTerms(BTreeSet<String>);

impl SearchTerms {
    /// Create an empty term set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a term. Empty strings are ignored; the term is lowercased.
    ///
    /// Returns `true` if the term was not already present.
    pub fn insert(&mut self, term: impl AsRef<str>) -> bool {
        let term = term.as_ref();
        if term.is_empty() {
            return false;
        }
        self.0.insert(term.to_lowercase())
    }

    /// Whether `term` is in the set (exact match).
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no usable term was derived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the terms in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> Extend<S> for SearchTerms {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut terms = Self::new();
        terms.extend(iter);
        terms
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes_and_lowercases() {
        let mut terms = SearchTerms::new();
        assert!(terms.insert("Flour"));
        assert!(!terms.insert("flour"));
        assert!(!terms.insert(""));
        assert_eq!(terms.len(), 1);
        assert!(terms.contains("flour"));
        assert!(!terms.contains("Flour"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let terms: SearchTerms = ["milk", "eggs", "flour"].into_iter().collect();
        let collected: Vec<&str> = terms.iter().collect();
        assert_eq!(collected, vec!["eggs", "flour", "milk"]);
    }

    #[test]
    fn test_empty() {
        let terms = SearchTerms::default();
        assert!(terms.is_empty());
        assert_eq!(terms.iter().count(), 0);
    }

    #[test]
    fn test_serializes_as_array() {
        let terms: SearchTerms = ["b", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&terms).unwrap(), r#"["a","b"]"#);
    }
}
