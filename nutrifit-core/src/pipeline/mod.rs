//! Recipe generation pipeline.
//!
//! - Steps are persona-bound prompts (`GenerationStep`)
//! - The executor runs them strictly in order, passing each step the
//!   outputs of the steps before it
//! - `RecipePipeline` wires the creation and analysis steps together

mod executor;
mod recipe;
mod step;

pub use executor::run_steps;
pub use recipe::{recipe_steps, RecipePipeline};
pub use step::{GenerationSettings, GenerationStep, StepOutput};
