//! Login guard and session helpers.
//!
//! Protected routes are wrapped in [`require_login`]. A request without a
//! logged-in user gets a JSON 401 on the search API and a redirect to the
//! login page everywhere else.

use axum::{
    extract::Request,
    http::header::ACCEPT,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{CurrentUser, session_keys};

/// Message returned to API callers that are not logged in.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Login required";

/// Middleware that rejects requests without a logged-in user.
///
/// On success the [`CurrentUser`] is inserted into the request extensions so
/// handlers can take it with `Extension<CurrentUser>`.
pub async fn require_login(session: Session, mut request: Request, next: Next) -> Response {
    match current_user(&session).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None if wants_json(&request) => {
            AppError::Unauthorized(LOGIN_REQUIRED_MESSAGE.to_string()).into_response()
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Read the logged-in user from the session, if any.
///
/// A session that fails to load or holds a malformed entry counts as
/// logged out.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to read session"))
        .ok()
        .flatten()
}

/// Helper to set the current user in the session.
///
/// The session id is cycled first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be deleted from the store.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

/// Whether the caller expects a JSON body rather than a page.
fn wants_json(request: &Request) -> bool {
    request.uri().path() == "/get-recipe"
        || request
            .headers()
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(uri: &str, accept: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_search_api_wants_json() {
        assert!(wants_json(&request("/get-recipe?ingredients=eggs", None)));
    }

    #[test]
    fn test_pages_want_html() {
        assert!(!wants_json(&request("/index", Some("text/html"))));
        assert!(!wants_json(&request("/index", None)));
    }

    #[test]
    fn test_accept_header_wants_json() {
        assert!(wants_json(&request("/index", Some("application/json"))));
    }
}
