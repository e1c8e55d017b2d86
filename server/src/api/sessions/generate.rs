use crate::api::{bad_request, session_not_found, ErrorResponse};
use crate::session::{SessionEvent, SessionView};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use nutrifit_core::types::{DEFAULT_CALORIES, DEFAULT_COOKING_TIME_MINUTES};
use nutrifit_core::{
    parse_ingredients, DietaryRestriction, RecipeError, RecipeRequest, SkillLevel,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// The recipe form as submitted by the page.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Ingredients, one per line
    pub ingredients: String,
    #[serde(default = "default_calories")]
    pub max_calories: u32,
    #[serde(default = "default_cooking_time")]
    pub max_cooking_time_minutes: u32,
    #[serde(default)]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
}

fn default_calories() -> u32 {
    DEFAULT_CALORIES
}

fn default_cooking_time() -> u32 {
    DEFAULT_COOKING_TIME_MINUTES
}

impl GenerateRequest {
    pub fn into_recipe_request(self) -> RecipeRequest {
        RecipeRequest::new(parse_ingredients(&self.ingredients))
            .with_max_calories(self.max_calories)
            .with_max_cooking_time(self.max_cooking_time_minutes)
            .with_skill_level(self.skill_level)
            .with_dietary_restrictions(self.dietary_restrictions)
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/generate",
    tag = "sessions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body(content = GenerateRequest, example = json!({
        "ingredients": "tomatoes\nchicken\nrice",
        "max_calories": 500,
        "max_cooking_time_minutes": 30,
        "skill_level": "Intermediate",
        "dietary_restrictions": []
    })),
    responses(
        (status = 200, description = "Recipe generated", body = SessionView),
        (status = 400, description = "Malformed or invalid form input, nothing generated", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Recipe generation failed", body = ErrorResponse)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> impl IntoResponse {
    if !state.sessions.contains(id) {
        return session_not_found();
    }

    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let request = req.into_recipe_request();

    let event = match state.pipeline.generate(&request).await {
        Ok(result) => SessionEvent::Generated(result),
        Err(RecipeError::Validation(e)) => return bad_request(e.to_string()),
        Err(RecipeError::Generation(e)) => {
            tracing::error!(session_id = %id, error = %e, "Error in recipe generation");
            SessionEvent::GenerationFailed(e.to_string())
        }
    };

    let Some(session) = state.sessions.apply(id, event) else {
        return session_not_found();
    };

    match session.view(id) {
        SessionView {
            error: Some(message),
            ..
        } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: format!("Error generating recipe: {}", message),
            }),
        )
            .into_response(),
        view => Json(view).into_response(),
    }
}
