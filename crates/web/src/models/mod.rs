//! Domain models for Larder.
//!
//! - [`recipe`] - Stored recipes and the per-request match breakdown
//! - [`user`] - Registered users
//! - [`session`] - Identity carried in the session cookie

pub mod recipe;
pub mod session;
pub mod user;

pub use recipe::{NewRecipe, Recipe, RecipeMatch, RecipeValidationError};
pub use session::{CurrentUser, session_keys};
pub use user::User;
