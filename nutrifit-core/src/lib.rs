pub mod ai;
pub mod error;
pub mod pipeline;
pub mod types;

pub use error::{GenerationError, RecipeError, ValidationError};
pub use pipeline::{GenerationSettings, RecipePipeline};
pub use types::{parse_ingredients, DietaryRestriction, RecipeRequest, RecipeResult, SkillLevel};
