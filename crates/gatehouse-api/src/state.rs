//! Application state shared across all handlers and middleware.

use std::fmt;
use std::sync::Arc;

use gatehouse_auth::{AccountService, Authenticator, CredentialHasher, build_authenticator};
use gatehouse_core::config::AppConfig;
use gatehouse_core::result::AppResult;
use gatehouse_database::{DatabasePool, UserDirectory, UserRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Identifies callers on protected paths
    pub authenticator: Arc<dyn Authenticator>,
    /// Registration and password management
    pub accounts: Arc<AccountService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the directory, hasher, authenticator and account service
    /// on top of an open pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> AppResult<Self> {
        let directory: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(db.pool().clone()));
        let hasher = Arc::new(CredentialHasher::new(&config.auth.hashing)?);

        let authenticator =
            build_authenticator(&config.auth, Arc::clone(&directory), Arc::clone(&hasher));
        let accounts = Arc::new(AccountService::new(directory, hasher));

        Ok(Self {
            config: Arc::new(config),
            db,
            authenticator,
            accounts,
        })
    }
}
