use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse)
    )
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.create();
    tracing::debug!(
        %session_id,
        live_sessions = state.sessions.live_count(),
        "session created"
    );

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
}
