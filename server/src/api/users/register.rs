use crate::api::{bad_request, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// True if this email was not registered before
    pub registered: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body(content = RegisterRequest, example = json!({"email": "cook@example.com"})),
    responses(
        (status = 201, description = "Email registered", body = RegisterResponse),
        (status = 200, description = "Email was already registered", body = RegisterResponse),
        (status = 400, description = "Blank email or malformed body", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    // Blank input is the only rejection; the text is stored as submitted.
    if req.email.trim().is_empty() {
        return bad_request("Please enter a valid email.");
    }

    let inserted = match state.registry.register(&req.email) {
        Ok(inserted) => inserted,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register email");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to register email".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.registry.count() {
        Ok(total) => tracing::info!(total_users = total, "Total registered users: {}", total),
        Err(e) => tracing::warn!(error = %e, "Failed to count registered users"),
    }

    if inserted {
        (
            StatusCode::CREATED,
            Json(RegisterResponse {
                registered: true,
                message: "Thank you for signing up!".to_string(),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::OK,
            Json(RegisterResponse {
                registered: false,
                message: "You are already registered.".to_string(),
            }),
        )
            .into_response()
    }
}
