//! User handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use gatehouse_entity::user::User;

use crate::dto::request::RegisterRequest;
use crate::dto::response::RegisterResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state
        .accounts
        .register_user(&req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: user.email,
            message: "user created".to_string(),
        }),
    ))
}

/// GET /api/v1/users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
