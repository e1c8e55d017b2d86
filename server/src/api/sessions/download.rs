use crate::api::{session_not_found, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use nutrifit_core::types::BUNDLE_FILE_NAME;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/download",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "recipe.json bundle", content_type = "application/json", body = nutrifit_core::RecipeResult),
        (status = 404, description = "Session not found or nothing generated yet", body = ErrorResponse)
    )
)]
pub async fn download(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let Some(session) = state.sessions.get(id) else {
        return session_not_found();
    };

    let Some(result) = session.result() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No recipe has been generated in this session".to_string(),
            }),
        )
            .into_response();
    };

    let body = match result.to_bundle_json() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize recipe bundle");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to build download".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", BUNDLE_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response()
}
