//! Ingredient search service.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::db::{RecipeQuery, RecipeRepository, RecipeSource, RepositoryError};
use crate::models::RecipeMatch;
use crate::search::{IngredientNormalizer, SearchError, classify_all};

/// Most search terms one request may produce.
///
/// Each term is one bind parameter, and `PostgreSQL` caps a statement at
/// 65,535 of them.
pub const MAX_SEARCH_TERMS: usize = 256;

/// Errors from a recipe search.
#[derive(Debug, Error)]
pub enum RecipeSearchError {
    /// Bad input or no matches.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The query could not be executed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Runs one ingredient search: normalize, query, classify.
pub struct RecipeFinder<'a, S = RecipeRepository<'a>> {
    source: S,
    normalizer: &'a IngredientNormalizer,
}

impl<'a> RecipeFinder<'a> {
    /// Create a recipe finder backed by the database.
    #[must_use]
    pub const fn new(pool: &'a PgPool, normalizer: &'a IngredientNormalizer) -> Self {
        Self::with_source(RecipeRepository::new(pool), normalizer)
    }
}

impl<'a, S: RecipeSource> RecipeFinder<'a, S> {
    /// Create a recipe finder over any row source.
    #[must_use]
    pub const fn with_source(source: S, normalizer: &'a IngredientNormalizer) -> Self {
        Self { source, normalizer }
    }

    /// Find recipes using any of the ingredients in `input`.
    ///
    /// The source is not queried when `input` yields no search terms or
    /// more than [`MAX_SEARCH_TERMS`].
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NoValidIngredients` if no terms were derived,
    /// `SearchError::TooManyIngredients` if there are too many,
    /// `SearchError::NoRecipes` if nothing matched, and
    /// `RecipeSearchError::Repository` if the query failed.
    #[instrument(skip(self))]
    pub async fn search(&self, input: &str) -> Result<Vec<RecipeMatch>, RecipeSearchError> {
        let terms = self.normalizer.normalize(input);
        if terms.len() > MAX_SEARCH_TERMS {
            return Err(SearchError::TooManyIngredients {
                max: MAX_SEARCH_TERMS,
            }
            .into());
        }
        let query = RecipeQuery::for_terms(&terms).ok_or(SearchError::NoValidIngredients)?;

        let rows = self.source.fetch_matching(&query).await?;
        debug!(terms = terms.len(), rows = rows.len(), "Recipe query finished");

        Ok(classify_all(rows, &terms)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::models::Recipe;

    use super::*;

    /// In-memory rows filtered the way `ingredients ILIKE '%term%'` would.
    pub(crate) struct StaticRecipes {
        rows: Vec<Recipe>,
        queries: AtomicUsize,
    }

    impl StaticRecipes {
        pub(crate) fn new(rows: &[(&str, &str, &str, &str)]) -> Self {
            let rows = rows
                .iter()
                .map(|(name, ingredients, instructions, steps)| Recipe {
                    name: (*name).to_string(),
                    ingredients: (*ingredients).to_string(),
                    instructions: (*instructions).to_string(),
                    steps: (*steps).to_string(),
                })
                .collect();
            Self {
                rows,
                queries: AtomicUsize::new(0),
            }
        }

        fn queries(&self) -> usize {
            self.queries.load(Ordering::SeqCst)
        }
    }

    impl RecipeSource for &StaticRecipes {
        async fn fetch_matching(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RepositoryError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            let needles: Vec<&str> = query
                .patterns()
                .iter()
                .map(|pattern| pattern.trim_matches('%'))
                .collect();

            Ok(self
                .rows
                .iter()
                .filter(|row| {
                    let ingredients = row.ingredients.to_lowercase();
                    needles.iter().any(|needle| ingredients.contains(needle))
                })
                .cloned()
                .collect())
        }
    }

    pub(crate) fn pantry() -> StaticRecipes {
        StaticRecipes::new(&[
            ("Cherry pie", "cherry, flour, butter", "Fill and bake.", "roll, fill, bake"),
            ("Lemonade", "lemons, sugar, water", "Stir.", "squeeze, stir"),
            ("Pancakes", "eggs, flour, milk", "Whisk and fry.", "mix, rest, fry"),
        ])
    }

    #[tokio::test]
    async fn test_matched_and_missing_for_seeded_row() {
        let source = StaticRecipes::new(&[(
            "Pancakes",
            "eggs, flour, milk",
            "Whisk and fry.",
            "mix, rest, fry",
        )]);
        let normalizer = IngredientNormalizer::new();

        let results = RecipeFinder::with_source(&source, &normalizer)
            .search("eggs and flour")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let pancakes = &results[0];
        assert_eq!(pancakes.name, "Pancakes");
        assert_eq!(pancakes.matched_ingredients, vec!["eggs", "flour"]);
        assert_eq!(pancakes.missing_ingredients, vec!["milk"]);
        assert_eq!(pancakes.instructions, "Whisk and fry.");
        assert_eq!(pancakes.steps, vec!["mix", "rest", "fry"]);
    }

    #[tokio::test]
    async fn test_plural_input_matches_singular_ingredient() {
        let source = pantry();
        let normalizer = IngredientNormalizer::new();

        let results = RecipeFinder::with_source(&source, &normalizer)
            .search("cherries")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Cherry pie");
        assert_eq!(results[0].matched_ingredients, vec!["cherry"]);
        assert_eq!(results[0].missing_ingredients, vec!["flour", "butter"]);
    }

    #[tokio::test]
    async fn test_no_match_is_no_recipes() {
        let source = pantry();
        let normalizer = IngredientNormalizer::new();

        let err = RecipeFinder::with_source(&source, &normalizer)
            .search("saffron")
            .await
            .unwrap_err();

        assert!(matches!(err, RecipeSearchError::Search(SearchError::NoRecipes)));
        assert_eq!(source.queries(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_skips_the_source() {
        let source = pantry();
        let normalizer = IngredientNormalizer::new();

        let err = RecipeFinder::with_source(&source, &normalizer)
            .search("  \t ")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecipeSearchError::Search(SearchError::NoValidIngredients)
        ));
        assert_eq!(source.queries(), 0);
    }

    #[tokio::test]
    async fn test_term_count_is_capped() {
        let source = pantry();
        let normalizer = IngredientNormalizer::new();
        let input: String = (0..=MAX_SEARCH_TERMS)
            .map(|i| format!("spice{i} "))
            .collect();

        let err = RecipeFinder::with_source(&source, &normalizer)
            .search(&input)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RecipeSearchError::Search(SearchError::TooManyIngredients {
                max: MAX_SEARCH_TERMS
            })
        ));
        assert_eq!(source.queries(), 0);
    }

    #[tokio::test]
    async fn test_any_term_selects_a_row() {
        let source = pantry();
        let normalizer = IngredientNormalizer::new();

        let results = RecipeFinder::with_source(&source, &normalizer)
            .search("milk sugar")
            .await
            .unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Lemonade", "Pancakes"]);
        assert_eq!(source.queries(), 1);
    }
}
