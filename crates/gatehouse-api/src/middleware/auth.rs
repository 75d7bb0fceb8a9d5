//! Authentication gate.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use gatehouse_auth::basic::authorization_header;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects protected requests that do not resolve to a user.
///
/// Exempt paths pass through untouched. On success the [`User`] is stored in
/// the request extensions for the `CurrentUser` extractor. Every failure gets
/// the same 401 body.
///
/// [`User`]: gatehouse_entity::user::User
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state
        .authenticator
        .requires_auth(Some(request.uri().path()))
    {
        return next.run(request).await;
    }

    let authorization = authorization_header(request.headers()).map(str::to_owned);
    let user = state
        .authenticator
        .authenticate(authorization.as_deref())
        .await;

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => ApiError::unauthorized().into_response(),
    }
}
