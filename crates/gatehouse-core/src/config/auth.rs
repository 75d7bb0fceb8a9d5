//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication scheme used to identify callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// HTTP Basic authentication against the user directory.
    #[default]
    Basic,
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Which authenticator handles protected requests.
    #[serde(default)]
    pub scheme: AuthScheme,
    /// Paths that do not require authentication. A trailing `*` marks a prefix.
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
    /// Password hashing cost.
    #[serde(default)]
    pub hashing: HashingConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            scheme: AuthScheme::default(),
            excluded_paths: default_excluded_paths(),
            hashing: HashingConfig::default(),
        }
    }
}

/// Argon2id cost parameters applied to newly hashed passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_excluded_paths() -> Vec<String> {
    vec!["/api/v1/status/".to_string(), "/api/v1/users/".to_string()]
}

fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
