//! The authentication capability and scheme selection.

use std::sync::Arc;

use async_trait::async_trait;

use gatehouse_core::config::{AuthConfig, AuthScheme};
use gatehouse_database::UserDirectory;
use gatehouse_entity::user::User;

use crate::basic::BasicAuthenticator;
use crate::password::CredentialHasher;
use crate::policy::PathAuthorizationPolicy;

/// Identifies callers from request metadata.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Whether a request for `path` must carry an identity.
    fn requires_auth(&self, path: Option<&str>) -> bool;

    /// Resolves the raw `Authorization` value to a user.
    ///
    /// Every failure, whatever its cause, is `None`.
    async fn authenticate(&self, authorization: Option<&str>) -> Option<User>;
}

/// Builds the authenticator selected by `auth.scheme`.
pub fn build_authenticator(
    config: &AuthConfig,
    directory: Arc<dyn UserDirectory>,
    hasher: Arc<CredentialHasher>,
) -> Arc<dyn Authenticator> {
    let policy = PathAuthorizationPolicy::from_config(config);

    match config.scheme {
        AuthScheme::Basic => Arc::new(BasicAuthenticator::new(directory, hasher, policy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::config::HashingConfig;
    use gatehouse_database::{DatabasePool, UserRepository};

    #[tokio::test]
    async fn test_basic_scheme_uses_configured_exemptions() {
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

        let config = AuthConfig {
            excluded_paths: vec!["/public*".to_string()],
            ..AuthConfig::default()
        };
        let authenticator = build_authenticator(&config, directory, hasher);

        assert!(!authenticator.requires_auth(Some("/public/index.html")));
        assert!(authenticator.requires_auth(Some("/api/v1/status")));
        assert!(authenticator.authenticate(None).await.is_none());
    }
}
