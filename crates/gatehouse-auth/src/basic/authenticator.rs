//! Basic authentication against the user directory.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use gatehouse_database::UserDirectory;
use gatehouse_entity::user::{User, UserFilter};

use crate::password::CredentialHasher;
use crate::policy::PathAuthorizationPolicy;
use crate::scheme::Authenticator;

use super::credentials::{decode_token, split_credentials};
use super::header::extract_token;

/// Resolves `Authorization: Basic` values to stored users.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct BasicAuthenticator {
    /// Where candidates are looked up by email.
    directory: Arc<dyn UserDirectory>,
    /// Checks the supplied password against the stored digest.
    hasher: Arc<CredentialHasher>,
    /// Paths that skip authentication.
    policy: PathAuthorizationPolicy,
}

impl fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("policy", &self.policy)
            .finish()
    }
}

impl BasicAuthenticator {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: Arc<CredentialHasher>,
        policy: PathAuthorizationPolicy,
    ) -> Self {
        Self {
            directory,
            hasher,
            policy,
        }
    }

    /// The exemption policy in effect.
    pub fn policy(&self) -> &PathAuthorizationPolicy {
        &self.policy
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn requires_auth(&self, path: Option<&str>) -> bool {
        self.policy.requires_auth(path)
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Option<User> {
        let Some(token) = extract_token(authorization) else {
            debug!(stage = "header", "Basic authentication failed");
            return None;
        };

        let Some(decoded) = decode_token(Some(token)) else {
            debug!(stage = "decode", "Basic authentication failed");
            return None;
        };

        let Some(credentials) = split_credentials(Some(&decoded)) else {
            debug!(stage = "split", "Basic authentication failed");
            return None;
        };

        let candidates = match self
            .directory
            .lookup(&UserFilter::by_email(credentials.email))
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "User lookup failed during Basic authentication");
                return None;
            }
        };

        // Emails are unique, so at most one candidate is expected.
        let Some(user) = candidates.into_iter().next() else {
            debug!(stage = "lookup", "Basic authentication failed");
            return None;
        };

        if !self
            .hasher
            .verify(credentials.password, &user.password_digest)
        {
            debug!(stage = "verify", user_id = user.id, "Basic authentication failed");
            return None;
        }

        debug!(user_id = user.id, "Basic authentication succeeded");
        Some(user)
    }
}
