//! AI prompt templates.

pub mod nutrition_analysis;
pub mod persona;
pub mod recipe_creation;

pub use nutrition_analysis::render_nutrition_analysis_prompt;
pub use persona::{render_persona_system_prompt, AgentPersona};
pub use recipe_creation::render_recipe_creation_prompt;
