pub mod create;
pub mod download;
pub mod generate;
pub mod get;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/sessions endpoints (mounted at /api/sessions)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_session))
        .route("/{id}", get(get::get_session))
        .route("/{id}/generate", post(generate::generate))
        .route("/{id}/download", get(download::download))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_session,
        get::get_session,
        generate::generate,
        download::download,
    ),
    components(schemas(
        create::CreateSessionResponse,
        generate::GenerateRequest,
        crate::session::SessionView,
        nutrifit_core::RecipeResult,
        nutrifit_core::SkillLevel,
        nutrifit_core::DietaryRestriction,
    ))
)]
pub struct ApiDoc;
