//! Recipe repository and the ingredient search query builder.

use std::fmt::Write as _;

use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use larder_core::SearchTerms;

use super::RepositoryError;
use crate::models::{NewRecipe, Recipe};

const SELECT_RECIPES: &str = "SELECT name, ingredients, instructions, steps FROM recipes";

/// A parameterized "ingredients match any term" query.
///
/// The SQL text only depends on how many terms there are: one
/// `ingredients ILIKE $n` clause per term, joined with `OR`. Term values live
/// in [`patterns`](Self::patterns) and are sent as bind parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    sql: String,
    patterns: Vec<String>,
}

impl RecipeQuery {
    /// Build the query for a term set.
    ///
    /// Returns `None` for an empty set; a `WHERE` clause with no
    /// alternatives is not a valid search.
    #[must_use]
    pub fn for_terms(terms: &SearchTerms) -> Option<Self> {
        if terms.is_empty() {
            return None;
        }

        let patterns: Vec<String> = terms.iter().map(contains_pattern).collect();

        let mut sql = String::from(SELECT_RECIPES);
        sql.push_str(" WHERE ");
        for placeholder in 1..=patterns.len() {
            if placeholder > 1 {
                sql.push_str(" OR ");
            }
            // Writing to a String cannot fail.
            let _ = write!(sql, "ingredients ILIKE ${placeholder}");
        }
        sql.push_str(" ORDER BY name");

        Some(Self { sql, patterns })
    }

    /// The SQL statement text (placeholders only, no term values).
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values, in placeholder order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Number of `$n` placeholders in the statement.
    #[must_use]
    pub fn placeholders(&self) -> usize {
        self.sql.matches(" ILIKE $").count()
    }
}

/// Wrap a term as a case-insensitive substring pattern.
///
/// `\`, `%` and `_` in the term are escaped so user input matches literally
/// (`\` is the default `LIKE` escape character in `PostgreSQL`).
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Where an ingredient search gets its candidate rows.
///
/// [`RecipeRepository`] is the `PostgreSQL` implementation.
pub trait RecipeSource {
    /// Fetch every recipe whose ingredients match any pattern of `query`.
    fn fetch_matching(
        &self,
        query: &RecipeQuery,
    ) -> impl Future<Output = Result<Vec<Recipe>, RepositoryError>> + Send;
}

impl RecipeSource for RecipeRepository<'_> {
    fn fetch_matching(
        &self,
        query: &RecipeQuery,
    ) -> impl Future<Output = Result<Vec<Recipe>, RepositoryError>> + Send {
        self.search(query)
    }
}

/// Repository for recipe database operations.
pub struct RecipeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecipeRepository<'a> {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every recipe whose ingredients match any term of `query`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip_all, fields(terms = query.patterns.len()))]
    pub async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RepositoryError> {
        let mut statement = sqlx::query_as::<_, Recipe>(query.sql());
        for pattern in query.patterns() {
            statement = statement.bind(pattern);
        }

        let rows = statement.fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Insert recipes in one transaction, joining list fields with the
    /// shared delimiter.
    ///
    /// Either every recipe is stored or none is; the transaction rolls back
    /// when an insert fails.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction or any insert
    /// fails.
    #[instrument(skip_all, fields(recipes = recipes.len()))]
    pub async fn insert_all(&self, recipes: &[NewRecipe]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0;
        for recipe in recipes {
            inserted += insert_recipe(&mut tx, recipe).await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Count stored recipes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

async fn insert_recipe(conn: &mut PgConnection, recipe: &NewRecipe) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r"
        INSERT INTO recipes (name, ingredients, instructions, steps)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(recipe.name.trim())
    .bind(recipe.joined_ingredients())
    .bind(recipe.instructions.trim())
    .bind(recipe.joined_steps())
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
