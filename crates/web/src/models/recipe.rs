//! Recipe domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter used to join `ingredients` and `steps` into a single text column.
///
/// Writers join with `", "`; readers split on `,` and trim, see
/// [`crate::search::split_list`].
pub const LIST_DELIMITER: char = ',';

/// A recipe row as read by the ingredient search.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Recipe {
    /// Display name.
    pub name: String,
    /// Comma-joined ingredient list.
    pub ingredients: String,
    /// Free-text instructions.
    pub instructions: String,
    /// Comma-joined step list.
    pub steps: String,
}

/// A recipe to insert (CLI seeding), with list fields still split.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub steps: Vec<String>,
}

/// Why a recipe cannot be stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeValidationError {
    #[error("recipe name is empty")]
    EmptyName,

    #[error("recipe '{0}' has no ingredients")]
    NoIngredients(String),

    /// An item would be split in two when read back.
    #[error("recipe '{recipe}': item '{item}' contains the list delimiter ','")]
    DelimiterInItem { recipe: String, item: String },
}

impl NewRecipe {
    /// Check the recipe survives a join/split round trip through storage.
    ///
    /// # Errors
    ///
    /// Returns `RecipeValidationError` for an empty name, no non-blank
    /// ingredients, or an ingredient/step containing [`LIST_DELIMITER`].
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if self.ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err(RecipeValidationError::NoIngredients(name.to_owned()));
        }
        if let Some(item) = self
            .ingredients
            .iter()
            .chain(&self.steps)
            .find(|item| item.contains(LIST_DELIMITER))
        {
            return Err(RecipeValidationError::DelimiterInItem {
                recipe: name.to_owned(),
                item: item.clone(),
            });
        }
        Ok(())
    }

    /// Ingredients joined for storage, lowercased and trimmed.
    #[must_use]
    pub fn joined_ingredients(&self) -> String {
        join_list(self.ingredients.iter().map(|i| i.trim().to_lowercase()))
    }

    /// Steps joined for storage, trimmed.
    #[must_use]
    pub fn joined_steps(&self) -> String {
        join_list(self.steps.iter().map(|s| s.trim().to_owned()))
    }
}

fn join_list(items: impl Iterator<Item = String>) -> String {
    items
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(&format!("{LIST_DELIMITER} "))
}

/// One recipe in a search response, classified against the search terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeMatch {
    pub name: String,
    /// Search terms that appear in the recipe's ingredient list.
    pub matched_ingredients: Vec<String>,
    /// Recipe ingredients the caller did not ask for.
    pub missing_ingredients: Vec<String>,
    pub instructions: String,
    pub steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pancakes() -> NewRecipe {
        NewRecipe {
            name: "Pancakes".to_string(),
            ingredients: vec!["eggs".to_string(), "flour".to_string()],
            instructions: "Whisk and fry.".to_string(),
            steps: vec!["Mix".to_string(), "Fry".to_string()],
        }
    }

    #[test]
    fn test_validate_accepts_plain_recipe() {
        assert_eq!(pancakes().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_delimiter_in_step() {
        let mut recipe = pancakes();
        recipe.steps = vec!["Mix, then rest".to_string()];
        assert!(matches!(
            recipe.validate(),
            Err(RecipeValidationError::DelimiterInItem { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut recipe = pancakes();
        recipe.name = "  ".to_string();
        assert_eq!(recipe.validate(), Err(RecipeValidationError::EmptyName));

        let mut recipe = pancakes();
        recipe.ingredients = vec![" ".to_string()];
        assert_eq!(
            recipe.validate(),
            Err(RecipeValidationError::NoIngredients("Pancakes".to_string()))
        );
    }

    #[test]
    fn test_new_recipe_joins_with_delimiter() {
        let recipe = NewRecipe {
            name: "Pancakes".to_string(),
            ingredients: vec![" Eggs".to_string(), "flour ".to_string(), String::new()],
            instructions: "Whisk and fry.".to_string(),
            steps: vec!["Mix".to_string(), "Fry".to_string()],
        };

        assert_eq!(recipe.joined_ingredients(), "eggs, flour");
        assert_eq!(recipe.joined_steps(), "Mix, Fry");
    }
}
