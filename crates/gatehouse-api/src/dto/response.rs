//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Service status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"OK"` while the server is answering.
    pub status: String,
}

/// Confirmation of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The registered email.
    pub email: String,
    /// Human-readable outcome.
    pub message: String,
}
