//! Ingredient search API.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::RecipeSource;
use crate::error::Result;
use crate::models::{CurrentUser, RecipeMatch};
use crate::services::RecipeFinder;
use crate::state::AppState;

/// Query parameters for `/get-recipe`.
#[derive(Debug, Deserialize)]
pub struct RecipeQueryParams {
    /// Free-text ingredient list. A missing parameter searches for nothing.
    #[serde(default)]
    pub ingredients: String,
}

/// Successful search response.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipes: Vec<RecipeMatch>,
}

/// Search recipes by ingredients.
///
/// # Errors
///
/// 400 when the input yields no search terms, 404 when nothing matched and
/// 500 when the query fails. Every error body is `{success: false, message}`.
#[instrument(skip(state, user, params), fields(user_id = %user.id))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<RecipeQueryParams>,
) -> Result<Json<RecipeResponse>> {
    let finder = RecipeFinder::new(state.pool(), state.normalizer());
    search(&finder, &params.ingredients).await
}

/// Run `finder` and wrap its matches in the success envelope.
async fn search<S: RecipeSource>(
    finder: &RecipeFinder<'_, S>,
    ingredients: &str,
) -> Result<Json<RecipeResponse>> {
    let recipes = finder
        .search(ingredients)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Recipe search failed"))?;

    tracing::info!(count = recipes.len(), "Recipe search succeeded");

    Ok(Json(RecipeResponse {
        success: true,
        recipes,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::{Value, json};

    use super::*;
    use crate::search::IngredientNormalizer;
    use crate::services::recipes::tests::{StaticRecipes, pantry};

    async fn respond(source: &StaticRecipes, ingredients: &str) -> (StatusCode, Value) {
        let normalizer = IngredientNormalizer::new();
        let finder = RecipeFinder::with_source(source, &normalizer);
        let response = search(&finder, ingredients).await.into_response();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_success_body() {
        let source = StaticRecipes::new(&[(
            "Pancakes",
            "eggs, flour, milk",
            "Whisk and fry.",
            "mix, rest, fry",
        )]);

        let (status, body) = respond(&source, "eggs and flour").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "recipes": [{
                    "name": "Pancakes",
                    "matched_ingredients": ["eggs", "flour"],
                    "missing_ingredients": ["milk"],
                    "instructions": "Whisk and fry.",
                    "steps": ["mix", "rest", "fry"],
                }],
            })
        );
    }

    #[tokio::test]
    async fn test_no_match_body() {
        let (status, body) = respond(&pantry(), "saffron").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "message": "No recipes found"}));
    }

    #[tokio::test]
    async fn test_blank_input_body() {
        let (status, body) = respond(&pantry(), "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "No valid ingredients found"})
        );
    }

    #[tokio::test]
    async fn test_too_many_terms_body() {
        let input: String = (0..=crate::services::MAX_SEARCH_TERMS)
            .map(|i| format!("herb{i} "))
            .collect();

        let (status, body) = respond(&pantry(), &input).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Too many ingredients (at most 256 search terms)"
        );
    }
}
