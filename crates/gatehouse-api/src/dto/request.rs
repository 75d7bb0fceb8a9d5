//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Registration request body.
///
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
