//! Ingredient text normalization and result classification.
//!
//! A free-text query like `"Eggs and flour, 2 tomatoes"` becomes a
//! [`SearchTerms`] set made of these passes over the lowercased input:
//!
//! - **raw tokens**: word tokens from tantivy's `SimpleTokenizer`
//! - **lemmas**: each token's singular form ([`SingularFilter`]) and its
//!   English Snowball stem
//! - **whitespace tokens**: the input split on whitespace, punctuation kept
//!
//! The word passes skip tokens of two characters or fewer; the whitespace
//! pass keeps everything.

mod classify;
mod plural;

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer, TokenStream,
};
use tracing::debug;

use larder_core::SearchTerms;

pub use classify::{SearchError, classify, classify_all, split_list};
pub use plural::{SingularFilter, singular};

/// Tokens with this many characters or fewer are dropped from the
/// linguistic passes.
const SHORT_TOKEN_CHARS: usize = 2;

/// Tokens longer than this many bytes are dropped by the tokenizer.
const MAX_TOKEN_BYTES: usize = 40;

/// Turns free-text ingredient input into search terms.
///
/// Cheap to clone; analyzers are cloned per call because tantivy token
/// streams borrow their analyzer mutably.
#[derive(Clone)]
pub struct IngredientNormalizer {
    words: TextAnalyzer,
    singulars: TextAnalyzer,
    stems: TextAnalyzer,
}

impl Default for IngredientNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientNormalizer {
    /// Build the word, singular and stem analyzers.
    #[must_use]
    pub fn new() -> Self {
        let words = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
            .filter(LowerCaser)
            .build();

        let singulars = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(SingularFilter)
            .build();

        let stems = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(Language::English))
            .build();

        Self {
            words,
            singulars,
            stems,
        }
    }

    /// Derive the search terms for `input`.
    ///
    /// Returns an empty set for empty or whitespace-only input.
    #[must_use]
    pub fn normalize(&self, input: &str) -> SearchTerms {
        let lowered = input.to_lowercase();
        let mut terms = SearchTerms::new();

        let words: Vec<String> = tokens(&mut self.words.clone(), &lowered)
            .into_iter()
            .filter(|word| word.chars().count() > SHORT_TOKEN_CHARS)
            .collect();

        let mut singulars = self.singulars.clone();
        let mut stems = self.stems.clone();
        for word in &words {
            terms.extend(tokens(&mut singulars, word));
            terms.extend(tokens(&mut stems, word));
        }
        terms.extend(&words);
        terms.extend(lowered.split_whitespace());

        debug!(words = words.len(), terms = terms.len(), "Normalized ingredient input");
        terms
    }
}

/// Run `analyzer` over `text` and collect the token texts.
fn tokens(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut stream = analyzer.token_stream(text);
    let mut out = Vec::new();
    while stream.advance() {
        out.push(stream.token().text.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(input: &str) -> SearchTerms {
        IngredientNormalizer::new().normalize(input)
    }

    #[test]
    fn test_contains_raw_tokens() {
        let terms = normalize("eggs and flour");
        assert!(!terms.is_empty());
        for expected in ["eggs", "and", "flour"] {
            assert!(terms.contains(expected), "missing {expected}: {terms:?}");
        }
    }

    #[test]
    fn test_adds_lemmas() {
        let terms = normalize("Tomatoes, Eggs");
        assert!(terms.contains("tomato"), "{terms:?}");
        assert!(terms.contains("egg"), "{terms:?}");
        assert!(terms.contains("tomatoes"));
        assert!(terms.contains("eggs"));
    }

    #[test]
    fn test_lemmas_include_dictionary_forms() {
        // The stemmer alone yields "cherri" and "leav".
        let terms = normalize("cherries");
        assert!(terms.contains("cherry"), "{terms:?}");
        assert!(terms.contains("cherries"));

        let terms = normalize("bay leaves, anchovies, berries");
        assert!(terms.contains("leaf"), "{terms:?}");
        assert!(terms.contains("anchovy"), "{terms:?}");
        assert!(terms.contains("berry"), "{terms:?}");
    }

    #[test]
    fn test_whitespace_tokens_keep_punctuation() {
        let terms = normalize("eggs,flour milk");
        assert!(terms.contains("eggs,flour"));
        assert!(terms.contains("eggs"));
        assert!(terms.contains("flour"));
        assert!(terms.contains("milk"));
    }

    #[test]
    fn test_short_tokens_only_from_whitespace_pass() {
        // "oz" survives as a whitespace token but is never stemmed.
        let terms = normalize("2 oz butter");
        assert!(terms.contains("2"));
        assert!(terms.contains("oz"));
        assert!(terms.contains("butter"));

        // Inside a longer whitespace token the short word is not split out.
        let terms = normalize("salt/oz");
        assert!(terms.contains("salt/oz"));
        assert!(terms.contains("salt"));
        assert!(!terms.contains("oz"));
    }

    #[test]
    fn test_lowercases_everything() {
        let terms = normalize("FLOUR");
        assert!(terms.iter().all(|t| t == t.to_lowercase()));
        assert!(terms.contains("flour"));
    }

    #[test]
    fn test_deduplicates() {
        let terms = normalize("milk milk MILK");
        assert_eq!(terms.iter().filter(|t| *t == "milk").count(), 1);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \t\n").is_empty());
    }
}
