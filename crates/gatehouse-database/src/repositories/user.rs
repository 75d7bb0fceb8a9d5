//! User repository implementation.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_entity::user::{User, UserField, UserFilter};

use crate::directory::UserDirectory;

/// Repository for user insert, query and update operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn lookup(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        if filter.is_empty() {
            return Err(AppError::invalid_query("User filter has no criteria"));
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, email, password_digest, session_token, reset_token FROM users WHERE ",
        );
        {
            let mut criteria = builder.separated(" AND ");
            if let Some(id) = filter.id {
                criteria.push("id = ").push_bind_unseparated(id);
            }
            if let Some(email) = &filter.email {
                criteria.push("email = ").push_bind_unseparated(email.clone());
            }
            if let Some(token) = &filter.session_token {
                criteria
                    .push("session_token = ")
                    .push_bind_unseparated(token.clone());
            }
            if let Some(token) = &filter.reset_token {
                criteria
                    .push("reset_token = ")
                    .push_bind_unseparated(token.clone());
            }
        }
        builder.push(" ORDER BY id");

        builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up users", e))
    }

    async fn insert(&self, email: &str, password_digest: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_digest) VALUES (?, ?) \
             RETURNING id, email, password_digest, session_token, reset_token",
        )
        .bind(email)
        .bind(password_digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::duplicate_email(email)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        debug!(user_id = user.id, "User row inserted");
        Ok(user)
    }

    async fn update(&self, id: i64, fields: &[(&str, Option<&str>)]) -> AppResult<()> {
        let mut changes: Vec<(UserField, Option<String>)> = Vec::with_capacity(fields.len());

        for (name, value) in fields {
            let field: UserField = name.parse()?;

            if !field.is_mutable() {
                return Err(AppError::validation(format!(
                    "Attribute {field} cannot be changed"
                )));
            }
            if field.is_required() && value.is_none() {
                return Err(AppError::validation(format!(
                    "Attribute {field} cannot be empty"
                )));
            }
            if changes.iter().any(|(seen, _)| *seen == field) {
                return Err(AppError::validation(format!(
                    "Attribute {field} given more than once"
                )));
            }

            changes.push((field, value.map(str::to_string)));
        }

        if changes.is_empty() {
            return self
                .find_one(&UserFilter::by_id(id))
                .await
                .map(|_| ())
                .map_err(|e| match e.kind {
                    ErrorKind::NotFound => AppError::not_found(format!("User {id} not found")),
                    _ => e,
                });
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
        {
            let mut assignments = builder.separated(", ");
            for (field, value) in changes {
                assignments
                    .push(format!("{} = ", field.column()))
                    .push_bind_unseparated(value);
            }
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict("Email already in use")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to update user", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }

        debug!(user_id = id, fields = fields.len(), "User row updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabasePool;

    async fn repository() -> UserRepository {
        let db = DatabasePool::in_memory().await.unwrap();
        UserRepository::new(db.into_pool())
    }

    #[tokio::test]
    async fn test_insert_and_lookup_by_email() {
        let repo = repository().await;

        let created = repo.insert("bob@example.com", "digest-1").await.unwrap();
        assert_eq!(created.email, "bob@example.com");
        assert_eq!(created.password_digest, "digest-1");
        assert!(created.session_token.is_none());

        let found = repo
            .lookup(&UserFilter::by_email("bob@example.com"))
            .await
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    async fn test_lookup_without_match_is_empty() {
        let repo = repository().await;
        repo.insert("bob@example.com", "digest").await.unwrap();

        let found = repo
            .lookup(&UserFilter::by_email("alice@example.com"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_combines_criteria() {
        let repo = repository().await;
        let bob = repo.insert("bob@example.com", "digest").await.unwrap();

        let filter = UserFilter {
            id: Some(bob.id),
            email: Some("bob@example.com".to_string()),
            ..UserFilter::default()
        };
        assert_eq!(repo.lookup(&filter).await.unwrap().len(), 1);

        let filter = UserFilter {
            id: Some(bob.id + 1),
            email: Some("bob@example.com".to_string()),
            ..UserFilter::default()
        };
        assert!(repo.lookup(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_filter_is_invalid_query() {
        let repo = repository().await;
        let err = repo.lookup(&UserFilter::default()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidQuery);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = repository().await;
        repo.insert("bob@example.com", "digest-1").await.unwrap();

        let err = repo
            .insert("bob@example.com", "digest-2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let found = repo
            .lookup(&UserFilter::by_email("bob@example.com"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].password_digest, "digest-1");
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let repo = repository().await;
        let err = repo.find_one(&UserFilter::by_id(42)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_sets_and_clears_tokens() {
        let repo = repository().await;
        let bob = repo.insert("bob@example.com", "digest").await.unwrap();

        repo.update(
            bob.id,
            &[("session_token", Some("s-1")), ("reset_token", Some("r-1"))],
        )
        .await
        .unwrap();

        let found = repo.find_one(&UserFilter::by_reset_token("r-1")).await.unwrap();
        assert_eq!(found.id, bob.id);
        assert_eq!(found.session_token.as_deref(), Some("s-1"));

        repo.update(bob.id, &[("reset_token", None)]).await.unwrap();
        let found = repo.find_one(&UserFilter::by_id(bob.id)).await.unwrap();
        assert!(found.reset_token.is_none());
        assert_eq!(found.session_token.as_deref(), Some("s-1"));
    }

    #[tokio::test]
    async fn test_update_unknown_field_writes_nothing() {
        let repo = repository().await;
        let bob = repo.insert("bob@example.com", "digest").await.unwrap();

        let err = repo
            .update(
                bob.id,
                &[("session_token", Some("s-1")), ("nickname", Some("bobby"))],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownField);

        let found = repo.find_one(&UserFilter::by_id(bob.id)).await.unwrap();
        assert!(found.session_token.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_id_and_null_digest() {
        let repo = repository().await;
        let bob = repo.insert("bob@example.com", "digest").await.unwrap();

        let err = repo.update(bob.id, &[("id", Some("9"))]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = repo
            .update(bob.id, &[("password_digest", None)])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = repository().await;

        let err = repo
            .update(99, &[("session_token", Some("s"))])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = repo.update(99, &[]).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_email_collision_is_conflict() {
        let repo = repository().await;
        repo.insert("alice@example.com", "digest").await.unwrap();
        let bob = repo.insert("bob@example.com", "digest").await.unwrap();

        let err = repo
            .update(bob.id, &[("email", Some("alice@example.com"))])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
