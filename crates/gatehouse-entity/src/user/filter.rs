//! Lookup criteria for the user directory.

use gatehouse_core::{AppError, AppResult};

/// Criteria for finding users. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Match on primary key.
    pub id: Option<i64>,
    /// Match on exact email.
    pub email: Option<String>,
    /// Match on session token.
    pub session_token: Option<String>,
    /// Match on password reset token.
    pub reset_token: Option<String>,
}

impl UserFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn by_session_token(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn by_reset_token(token: impl Into<String>) -> Self {
        Self {
            reset_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Build a filter from `key = value` pairs.
    ///
    /// Unknown keys, repeated keys and non-numeric ids are rejected as
    /// invalid queries.
    pub fn from_pairs<'a, I>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();

        for (key, value) in pairs {
            let slot_taken = match key {
                "id" => {
                    let id = value.parse::<i64>().map_err(|_| {
                        AppError::invalid_query(format!("Invalid id '{value}' in user filter"))
                    })?;
                    filter.id.replace(id).is_some()
                }
                "email" => filter.email.replace(value.to_string()).is_some(),
                "session_token" => filter.session_token.replace(value.to_string()).is_some(),
                "reset_token" => filter.reset_token.replace(value.to_string()).is_some(),
                other => {
                    return Err(AppError::invalid_query(format!(
                        "Unknown user filter key '{other}'"
                    )));
                }
            };

            if slot_taken {
                return Err(AppError::invalid_query(format!(
                    "Duplicate user filter key '{key}'"
                )));
            }
        }

        Ok(filter)
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.email.is_none()
            && self.session_token.is_none()
            && self.reset_token.is_none()
    }
}
