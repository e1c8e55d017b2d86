use thiserror::Error;

use crate::ai::AiError;

/// Problems with a recipe request, detected before any model call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter at least one ingredient!")]
    EmptyIngredients,

    #[error("Max calories must be between {min} and {max}, got {value}")]
    CaloriesOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Max cooking time must be between {min} and {max} minutes, got {value}")]
    CookingTimeOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Unknown skill level: {0}")]
    UnknownSkillLevel(String),

    #[error("Unknown dietary restriction: {0}")]
    UnknownDietaryRestriction(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Step '{step}' failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: AiError,
    },

    #[error("AI client unavailable: {0}")]
    Client(#[from] AiError),

    #[error("Pipeline produced {got} outputs, expected {expected}")]
    Incomplete { expected: usize, got: usize },
}

/// Error returned at the pipeline boundary.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
