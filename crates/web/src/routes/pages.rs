//! Page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, response::Redirect};
use tracing::instrument;

use crate::models::CurrentUser;

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub username: String,
}

/// Redirect the bare root to the search page.
pub async fn root() -> Redirect {
    Redirect::to("/index")
}

/// Display the search page for the logged-in user.
#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn index(Extension(user): Extension<CurrentUser>) -> IndexTemplate {
    IndexTemplate {
        username: user.username.to_string(),
    }
}
