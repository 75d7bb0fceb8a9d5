//! `CurrentUser` extractor: the user the authentication gate resolved.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_entity::user::User;

use crate::error::ApiError;

/// The authenticated caller, available in handlers behind the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the gate authenticated this request; an exempt
        // path never carries one.
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::unauthorized)
    }
}
