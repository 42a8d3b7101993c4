//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! larder-cli user create -e cook@example.com -u cook -p 'correct horse'
//! ```
//!
//! Users go through the same validation and hashing as web signups.

use larder_web::services::AuthService;

/// Create a new user.
///
/// # Errors
///
/// Returns an error for invalid fields, a weak password, a taken
/// email/username or a database failure.
pub async fn create(
    email: &str,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Creating user: {}", username);
    let user = AuthService::new(&pool)
        .register(email, username, password)
        .await?;

    tracing::info!(user_id = %user.id, "User created: {} <{}>", user.username, user.email);
    Ok(())
}
