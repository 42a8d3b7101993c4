//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Username/password registration and login
//! - `recipes` - Ingredient search: normalize, query, classify

pub mod auth;
pub mod recipes;

pub use auth::{AuthError, AuthService};
pub use recipes::{MAX_SEARCH_TERMS, RecipeFinder, RecipeSearchError};
