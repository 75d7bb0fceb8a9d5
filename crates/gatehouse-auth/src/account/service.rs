//! Registration, login checks and password resets.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_database::UserDirectory;
use gatehouse_entity::user::{User, UserField, UserFilter};

use crate::password::CredentialHasher;

/// Creates accounts and manages their passwords.
#[derive(Clone)]
pub struct AccountService {
    /// User storage.
    directory: Arc<dyn UserDirectory>,
    /// Password hasher.
    hasher: Arc<CredentialHasher>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: Arc<CredentialHasher>) -> Self {
        Self { directory, hasher }
    }

    /// Creates a user with a freshly hashed password.
    ///
    /// Fails with a conflict if the email is already registered, including
    /// when a concurrent registration wins the race to insert.
    pub async fn register_user(&self, email: &str, password: &str) -> AppResult<User> {
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let existing = self.directory.lookup(&UserFilter::by_email(email)).await?;
        if !existing.is_empty() {
            return Err(AppError::duplicate_email(email));
        }

        let digest = self.hasher.hash(password)?;
        let user = self.directory.insert(email, &digest).await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Whether `password` is correct for the user registered under `email`.
    pub async fn valid_login(&self, email: &str, password: &str) -> bool {
        match self.directory.find_one(&UserFilter::by_email(email)).await {
            Ok(user) => self.hasher.verify(password, &user.password_digest),
            Err(e) => {
                debug!(error = %e, "Login check found no usable user");
                false
            }
        }
    }

    /// Issues a new reset token for the user registered under `email`.
    ///
    /// Any earlier token for that user stops working.
    pub async fn get_reset_password_token(&self, email: &str) -> AppResult<String> {
        let user = self
            .directory
            .find_one(&UserFilter::by_email(email))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => AppError::not_found("No user registered with that email"),
                _ => e,
            })?;

        let token = Uuid::new_v4().to_string();
        self.directory
            .update(
                user.id,
                &[(UserField::ResetToken.column(), Some(token.as_str()))],
            )
            .await?;

        info!(user_id = user.id, "Password reset token issued");
        Ok(token)
    }

    /// Replaces the password of the user holding `reset_token`.
    ///
    /// The token is consumed in the same update that stores the new digest.
    pub async fn update_password(&self, reset_token: &str, password: &str) -> AppResult<()> {
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let user = self
            .directory
            .find_one(&UserFilter::by_reset_token(reset_token))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound => AppError::not_found("Reset token is not valid"),
                _ => e,
            })?;

        let digest = self.hasher.hash(password)?;
        self.directory
            .update(
                user.id,
                &[
                    (UserField::PasswordDigest.column(), Some(digest.as_str())),
                    (UserField::ResetToken.column(), None),
                ],
            )
            .await?;

        info!(user_id = user.id, "Password updated from reset token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::config::HashingConfig;
    use gatehouse_database::{DatabasePool, UserRepository};

    async fn service() -> (AccountService, Arc<dyn UserDirectory>) {
        let db = DatabasePool::in_memory().await.unwrap();
        let directory: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(db.into_pool()));
        let hasher = Arc::new(
            CredentialHasher::new(&HashingConfig {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        (AccountService::new(directory.clone(), hasher), directory)
    }

    #[tokio::test]
    async fn test_register_user() {
        let (service, directory) = service().await;

        let user = service.register_user("bob@example.com", "secret").await.unwrap();
        assert_eq!(user.email, "bob@example.com");
        assert_ne!(user.password_digest, "secret");
        assert!(user.password_digest.starts_with("$argon2id$"));

        let stored = directory
            .find_one(&UserFilter::by_email("bob@example.com"))
            .await
            .unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _directory) = service().await;
        service.register_user("bob@example.com", "secret").await.unwrap();

        let err = service
            .register_user("bob@example.com", "other")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User bob@example.com already exists");

        assert!(service.valid_login("bob@example.com", "secret").await);
        assert!(!service.valid_login("bob@example.com", "other").await);
    }

    #[tokio::test]
    async fn test_register_requires_email_and_password() {
        let (service, _directory) = service().await;

        let err = service.register_user("", "secret").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service.register_user("bob@example.com", "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_valid_login() {
        let (service, _directory) = service().await;
        service.register_user("bob@example.com", "secret").await.unwrap();

        assert!(service.valid_login("bob@example.com", "secret").await);
        assert!(!service.valid_login("bob@example.com", "wrong").await);
        assert!(!service.valid_login("alice@example.com", "secret").await);
        assert!(!service.valid_login("", "").await);
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let (service, directory) = service().await;
        let bob = service.register_user("bob@example.com", "secret").await.unwrap();

        let token = service
            .get_reset_password_token("bob@example.com")
            .await
            .unwrap();
        assert!(Uuid::parse_str(&token).is_ok());

        let stored = directory.find_one(&UserFilter::by_id(bob.id)).await.unwrap();
        assert_eq!(stored.reset_token.as_deref(), Some(token.as_str()));

        service.update_password(&token, "new-secret").await.unwrap();

        assert!(service.valid_login("bob@example.com", "new-secret").await);
        assert!(!service.valid_login("bob@example.com", "secret").await);

        let stored = directory.find_one(&UserFilter::by_id(bob.id)).await.unwrap();
        assert!(stored.reset_token.is_none());
    }

    #[tokio::test]
    async fn test_reset_token_is_single_use() {
        let (service, _directory) = service().await;
        service.register_user("bob@example.com", "secret").await.unwrap();

        let token = service
            .get_reset_password_token("bob@example.com")
            .await
            .unwrap();
        service.update_password(&token, "new-secret").await.unwrap();

        let err = service
            .update_password(&token, "another")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(service.valid_login("bob@example.com", "new-secret").await);
    }

    #[tokio::test]
    async fn test_new_reset_token_replaces_old() {
        let (service, _directory) = service().await;
        service.register_user("bob@example.com", "secret").await.unwrap();

        let first = service
            .get_reset_password_token("bob@example.com")
            .await
            .unwrap();
        let second = service
            .get_reset_password_token("bob@example.com")
            .await
            .unwrap();
        assert_ne!(first, second);

        let err = service.update_password(&first, "x").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        service.update_password(&second, "x").await.unwrap();
    }

    #[tokio::test]
    async fn test_reset_unknown_email() {
        let (service, _directory) = service().await;

        let err = service
            .get_reset_password_token("nobody@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_password_unknown_token() {
        let (service, _directory) = service().await;
        service.register_user("bob@example.com", "secret").await.unwrap();

        let err = service
            .update_password("not-a-token", "new-secret")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(service.valid_login("bob@example.com", "secret").await);
    }
}
