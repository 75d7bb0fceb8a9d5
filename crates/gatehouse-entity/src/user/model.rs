//! User entity model.

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

/// A registered user.
#[derive(Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique email address, used as the login name.
    pub email: String,
    /// Self-describing password digest.
    #[serde(skip_serializing)]
    pub password_digest: String,
    /// Current session token, if a session is open.
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    /// Outstanding password reset token.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_digest", &"<redacted>")
            .field("has_session", &self.session_token.is_some())
            .field("has_reset_token", &self.reset_token.is_some())
            .finish()
    }
}
