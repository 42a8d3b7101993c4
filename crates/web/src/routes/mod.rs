//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /index
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Search (requires login)
//! GET  /index                  - Search page
//! GET  /get-recipe             - Ingredient search API (JSON)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action (rate limited)
//! GET  /logout_user            - Logout action
//! ```

pub mod auth;
pub mod health;
pub mod pages;
pub mod recipes;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, require_login};
use crate::state::AppState;

/// Create the auth routes router.
///
/// Only the credential posts are rate limited; the pages themselves are not.
pub fn auth_routes() -> Router<AppState> {
    let credential_posts = Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route_layer(auth_rate_limiter());

    Router::new()
        .route("/login", get(auth::login_page))
        .route("/signup", get(auth::signup_page))
        .route("/logout_user", get(auth::logout))
        .merge(credential_posts)
}

/// Create the routes that require a logged-in user.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/index", get(pages::index))
        .route("/get-recipe", get(recipes::get_recipe))
        .route_layer(middleware::from_fn(require_login))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(protected_routes())
        .merge(auth_routes())
}
