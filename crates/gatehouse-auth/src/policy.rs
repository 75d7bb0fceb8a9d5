//! Path exemption rules.
//!
//! A rule is either an exact path or a prefix terminated by [`WILDCARD`].
//! Paths are compared with a trailing `/` appended when missing, so
//! `/api/v1/status` and `/api/v1/status/` are the same path.

use std::borrow::Cow;

use gatehouse_core::config::AuthConfig;

/// Marks a rule as a prefix when it is the rule's last character.
pub const WILDCARD: char = '*';

/// Decides whether `path` needs authentication given a set of exemption rules.
///
/// Fails closed: a missing or empty path, or an empty rule set, always
/// requires authentication. Matching is existential, so rule order does not
/// affect the result.
pub fn requires_auth<S: AsRef<str>>(path: Option<&str>, exemptions: &[S]) -> bool {
    let path = match path {
        Some(path) if !path.is_empty() => path,
        _ => return true,
    };

    if exemptions.is_empty() {
        return true;
    }

    let normalized: Cow<'_, str> = if path.ends_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    };

    !exemptions
        .iter()
        .any(|rule| rule_matches(rule.as_ref(), &normalized))
}

fn rule_matches(rule: &str, normalized: &str) -> bool {
    match rule.strip_suffix(WILDCARD) {
        // The literal comparison lets a rule like `/files/*` exempt a path
        // that is itself `/files/*`.
        Some(prefix) => normalized.starts_with(prefix) || normalized == rule,
        None => normalized == rule,
    }
}

/// The configured set of authentication exemptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAuthorizationPolicy {
    exemptions: Vec<String>,
}

impl PathAuthorizationPolicy {
    /// Creates a policy from exemption rules.
    pub fn new<I, S>(exemptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exemptions: exemptions.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a policy from `auth.excluded_paths`.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.excluded_paths.iter().cloned())
    }

    /// Whether a request for `path` must be authenticated.
    pub fn requires_auth(&self, path: Option<&str>) -> bool {
        requires_auth(path, &self.exemptions)
    }

    /// The exemption rules in configuration order.
    pub fn exemptions(&self) -> &[String] {
        &self.exemptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_exact_rule() {
        assert!(!requires_auth(Some("/api/v1/status/"), &["/api/v1/status/"]));
        assert!(!requires_auth(Some("/api/v1/status"), &["/api/v1/status/"]));
        assert!(requires_auth(Some("/api/v1/stats/"), &["/api/v1/status/"]));
    }

    #[test]
    fn test_exact_rule_does_not_match_children() {
        assert!(requires_auth(
            Some("/api/v1/status/extra"),
            &["/api/v1/status/"]
        ));
    }

    #[test]
    fn test_wildcard_prefix() {
        let rules = ["/api/v1/stat*"];
        assert!(!requires_auth(Some("/api/v1/status"), &rules));
        assert!(!requires_auth(Some("/api/v1/stats/"), &rules));
        assert!(!requires_auth(Some("/api/v1/stat"), &rules));
        assert!(requires_auth(Some("/api/v1/users/"), &rules));
    }

    #[test]
    fn test_wildcard_literal_fallback() {
        assert!(!requires_auth(Some("/files/*/"), &["/files/*/*"]));
        assert!(!requires_auth(Some("/files/x/"), &["/files/*"]));
    }

    #[test]
    fn test_fail_closed() {
        assert!(requires_auth(None, &["/api/v1/status/"]));
        assert!(requires_auth(Some(""), &["/api/v1/status/"]));
        assert!(requires_auth(Some("/api/v1/status/"), &NONE));
    }

    #[test]
    fn test_rule_order_is_irrelevant() {
        let forward = ["/api/v1/users/", "/api/v1/stat*", "/health/"];
        let mut backward = forward;
        backward.reverse();

        for path in [
            "/api/v1/users",
            "/api/v1/status",
            "/health",
            "/api/v1/users/me",
            "/",
        ] {
            assert_eq!(
                requires_auth(Some(path), &forward),
                requires_auth(Some(path), &backward),
                "{path}"
            );
        }
    }

    #[test]
    fn test_policy_from_config() {
        let policy = PathAuthorizationPolicy::from_config(&AuthConfig::default());
        assert!(!policy.requires_auth(Some("/api/v1/status")));
        assert!(!policy.requires_auth(Some("/api/v1/users")));
        assert!(policy.requires_auth(Some("/api/v1/users/me")));
        assert!(policy.requires_auth(None));
    }

    #[test]
    fn test_empty_policy_requires_everything() {
        let policy = PathAuthorizationPolicy::default();
        assert!(policy.requires_auth(Some("/api/v1/status/")));
        assert!(policy.exemptions().is_empty());
    }
}
