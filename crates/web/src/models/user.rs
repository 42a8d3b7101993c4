//! User domain types.

use chrono::{DateTime, Utc};

use larder_core::{Email, UserId, Username};

/// A registered user (without the password hash).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Login name.
    pub username: Username,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
