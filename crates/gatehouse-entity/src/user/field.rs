//! Column names of the `users` table.

use std::fmt;
use std::str::FromStr;

use gatehouse_core::AppError;

/// A field of the [`User`](super::User) schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// Primary key. Part of the schema but never updated.
    Id,
    /// Login email.
    Email,
    /// Password digest.
    PasswordDigest,
    /// Session token.
    SessionToken,
    /// Password reset token.
    ResetToken,
}

impl UserField {
    /// The SQL column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Email => "email",
            Self::PasswordDigest => "password_digest",
            Self::SessionToken => "session_token",
            Self::ResetToken => "reset_token",
        }
    }

    /// Whether the field may be changed after insertion.
    pub fn is_mutable(&self) -> bool {
        !matches!(self, Self::Id)
    }

    /// Whether the column rejects `NULL`.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Id | Self::Email | Self::PasswordDigest)
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for UserField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "email" => Ok(Self::Email),
            "password_digest" => Ok(Self::PasswordDigest),
            "session_token" => Ok(Self::SessionToken),
            "reset_token" => Ok(Self::ResetToken),
            _ => Err(AppError::unknown_field(s)),
        }
    }
}
