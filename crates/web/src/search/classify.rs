//! Matched/missing ingredient breakdown for search results.

use thiserror::Error;

use larder_core::SearchTerms;

use crate::models::recipe::LIST_DELIMITER;
use crate::models::{Recipe, RecipeMatch};

/// Why an ingredient search produced no recipes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The input produced no search terms.
    #[error("No valid ingredients found")]
    NoValidIngredients,

    /// The input produced more search terms than one query may bind.
    #[error("Too many ingredients (at most {max} search terms)")]
    TooManyIngredients { max: usize },

    /// The query ran but matched no rows.
    #[error("No recipes found")]
    NoRecipes,
}

/// Split a delimiter-joined column into trimmed, non-empty items.
///
/// ```
/// use larder_web::search::split_list;
///
/// assert_eq!(split_list("mix, bake, cool"), vec!["mix", "bake", "cool"]);
/// ```
#[must_use]
pub fn split_list(text: &str) -> Vec<String> {
    text.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Classify one recipe's ingredients against the search terms.
#[must_use]
pub fn classify(recipe: Recipe, terms: &SearchTerms) -> RecipeMatch {
    let ingredients: Vec<String> = split_list(&recipe.ingredients.to_lowercase());

    let matched_ingredients = terms
        .iter()
        .filter(|term| ingredients.iter().any(|ingredient| ingredient.as_str() == *term))
        .map(str::to_owned)
        .collect();

    let missing_ingredients = ingredients
        .into_iter()
        .filter(|ingredient| !terms.contains(ingredient))
        .collect();

    RecipeMatch {
        name: recipe.name,
        matched_ingredients,
        missing_ingredients,
        instructions: recipe.instructions,
        steps: split_list(&recipe.steps),
    }
}

/// Classify every row, or report [`SearchError::NoRecipes`] for an empty result.
///
/// # Errors
///
/// Returns `SearchError::NoRecipes` if `rows` is empty.
pub fn classify_all(
    rows: Vec<Recipe>,
    terms: &SearchTerms,
) -> Result<Vec<RecipeMatch>, SearchError> {
    if rows.is_empty() {
        return Err(SearchError::NoRecipes);
    }

    Ok(rows.into_iter().map(|row| classify(row, terms)).collect())
}
