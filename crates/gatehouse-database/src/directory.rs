//! The user directory abstraction consumed by authentication.

use async_trait::async_trait;

use gatehouse_core::{AppError, AppResult};
use gatehouse_entity::user::{User, UserFilter};

/// Read and write access to stored users.
///
/// Implementations must enforce email uniqueness themselves; callers rely
/// on `insert` failing rather than on a prior lookup.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Return every user matching all criteria in `filter`, ordered by id.
    ///
    /// An empty filter is an invalid query.
    async fn lookup(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Add a user. Fails with a conflict if the email is already present.
    async fn insert(&self, email: &str, password_digest: &str) -> AppResult<User>;

    /// Change named fields of one user in a single statement.
    ///
    /// Field names outside the user schema fail with an unknown-field error
    /// before anything is written; a missing id fails with not-found.
    async fn update(&self, id: i64, fields: &[(&str, Option<&str>)]) -> AppResult<()>;

    /// First user matching `filter`, or a not-found error.
    async fn find_one(&self, filter: &UserFilter) -> AppResult<User> {
        self.lookup(filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("No user found with the given criteria"))
    }
}
