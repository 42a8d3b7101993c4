//! Recipe catalogue commands.
//!
//! # Usage
//!
//! ```bash
//! larder-cli recipes seed recipes.json
//! larder-cli recipes seed recipes.yaml --dry-run
//! ```
//!
//! The file is an array of recipes with list-valued ingredients and steps:
//!
//! ```json
//! [{"name": "Pancakes", "ingredients": ["eggs", "flour", "milk"],
//!   "instructions": "Whisk and fry.", "steps": ["mix", "rest", "fry"]}]
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use larder_web::db::RecipeRepository;
use larder_web::models::{NewRecipe, RecipeValidationError};

/// Errors reading or checking a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{count} invalid recipe(s), nothing inserted")]
    Invalid { count: usize },
}

/// Parse a seed file. `.yaml`/`.yml` files are read as YAML, anything else as JSON.
fn parse(path: &Path, content: &str) -> Result<Vec<NewRecipe>, SeedError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

/// Validate every recipe, collecting all problems.
fn validate_all(recipes: &[NewRecipe]) -> Vec<RecipeValidationError> {
    recipes
        .iter()
        .filter_map(|recipe| recipe.validate().err())
        .collect()
}

/// Seed recipes from a file.
///
/// The whole file is validated before the database is touched, and the
/// inserts share one transaction.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, any recipe fails
/// validation, or an insert fails.
pub async fn seed(file: &Path, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(SeedError::NotFound(file.display().to_string()).into());
    }

    info!(path = %file.display(), "Loading recipes from file");
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(SeedError::from)?;
    let recipes = parse(file, &content)?;
    info!(recipes = recipes.len(), "Parsed recipe file");

    let problems = validate_all(&recipes);
    if !problems.is_empty() {
        for problem in &problems {
            error!("{problem}");
        }
        return Err(SeedError::Invalid {
            count: problems.len(),
        }
        .into());
    }

    if dry_run {
        info!("Dry run, skipping inserts");
        return Ok(());
    }

    let pool = super::connect().await?;
    let repository = RecipeRepository::new(&pool);

    let inserted = repository.insert_all(&recipes).await?;

    let total = repository.count().await?;
    info!(inserted, total, "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        {"name": "Pancakes", "ingredients": ["eggs", "flour", "milk"],
         "instructions": "Whisk and fry.", "steps": ["mix", "rest", "fry"]}
    ]"#;

    const YAML: &str = "
- name: Omelette
  ingredients: [eggs, butter]
  instructions: Beat and cook.
  steps: [beat, cook, fold]
";

    #[test]
    fn test_parse_json() {
        let recipes = parse(Path::new("recipes.json"), JSON).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].joined_ingredients(), "eggs, flour, milk");
    }

    #[test]
    fn test_parse_yaml_by_extension() {
        let recipes = parse(Path::new("recipes.YML"), YAML).unwrap();
        assert_eq!(recipes[0].name, "Omelette");
        assert_eq!(recipes[0].joined_steps(), "beat, cook, fold");
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = parse(Path::new("bad.json"), r#"[{"name": "Toast"}]"#).unwrap_err();
        assert!(matches!(err, SeedError::Json(_)));
    }

    #[test]
    fn test_validate_all_collects_every_problem() {
        let json = r#"[
            {"name": "", "ingredients": ["eggs"], "instructions": "", "steps": []},
            {"name": "Stew", "ingredients": ["salt, pepper"], "instructions": "", "steps": []}
        ]"#;
        let recipes = parse(Path::new("r.json"), json).unwrap();
        assert_eq!(validate_all(&recipes).len(), 2);
    }
}
