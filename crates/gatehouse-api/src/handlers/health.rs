//! Health check handlers.

use axum::Json;

use crate::dto::response::StatusResponse;

/// GET /api/v1/status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}
