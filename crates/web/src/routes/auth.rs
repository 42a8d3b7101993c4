//! Authentication route handlers.
//!
//! Login, signup and logout for username/password accounts. Failures re-render
//! the form with a message and the matching status code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Shown when a signup form is missing a field.
pub const MISSING_INFORMATION: &str = "Missing information";

/// Shown when login fails for any credential reason.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Shown on the login page after a successful signup.
pub const ACCOUNT_CREATED: &str = "Account created";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// Fields default to empty so a missing field is a 400 with the form
/// re-rendered rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

impl LoginTemplate {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }
}

impl SignupTemplate {
    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            LoginTemplate::error(MISSING_INFORMATION),
        )
            .into_response();
    }

    let user = match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                LoginTemplate::error(INVALID_CREDENTIALS),
            )
                .into_response();
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
        tracing::error!(error = %e, "Failed to set session");
        return AppError::Internal(e.to_string()).into_response();
    }

    set_sentry_user(&user.id, user.username.as_str());
    tracing::info!(user_id = %user.id, "User logged in");

    Redirect::to("/index").into_response()
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    SignupTemplate { error: query.error }
}

/// Handle signup form submission.
///
/// The new user is not logged in; the login page is rendered with a
/// confirmation instead.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    if form.email.trim().is_empty() || form.username.trim().is_empty() || form.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            SignupTemplate::error(MISSING_INFORMATION),
        )
            .into_response();
    }

    match AuthService::new(state.pool())
        .register(&form.email, &form.username, &form.password)
        .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            LoginTemplate {
                error: None,
                success: Some(ACCOUNT_CREATED.to_string()),
            },
        )
            .into_response(),
        Err(e @ (AuthError::InvalidField(_) | AuthError::WeakPassword(_))) => {
            let err = AppError::from(e);
            (err.status(), SignupTemplate::error(err.message())).into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            tracing::info!("Signup rejected: account exists");
            let err = AppError::from(AuthError::UserAlreadyExists);
            (err.status(), SignupTemplate::error(err.message())).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Log out: drop the session entirely and go back to the login page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();

    Redirect::to("/login").into_response()
}
