pub mod register;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(register::register))
}

#[derive(OpenApi)]
#[openapi(
    paths(register::register),
    components(schemas(register::RegisterRequest, register::RegisterResponse))
)]
pub struct ApiDoc;
