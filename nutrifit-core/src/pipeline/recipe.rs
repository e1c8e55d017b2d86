//! The two-step recipe pipeline: create recipes, then analyse their nutrition.

use std::sync::Arc;

use crate::ai::prompts::nutrition_analysis::{
    NUTRITION_ANALYSIS_EXPECTED_OUTPUT, NUTRITION_ANALYSIS_PROMPT_NAME,
};
use crate::ai::prompts::recipe_creation::{
    RECIPE_CREATION_EXPECTED_OUTPUT, RECIPE_CREATION_PROMPT_NAME,
};
use crate::ai::prompts::{
    render_nutrition_analysis_prompt, render_recipe_creation_prompt, AgentPersona,
};
use crate::ai::{create_client_from_env, AiClient};
use crate::error::{GenerationError, RecipeError};
use crate::pipeline::executor::run_steps;
use crate::pipeline::step::{GenerationSettings, GenerationStep};
use crate::types::{RecipeRequest, RecipeResult};

/// Build the creation and analysis steps for `request`, in execution order.
pub fn recipe_steps(request: &RecipeRequest) -> [GenerationStep; 2] {
    [
        GenerationStep {
            name: RECIPE_CREATION_PROMPT_NAME,
            description: render_recipe_creation_prompt(request),
            expected_output: RECIPE_CREATION_EXPECTED_OUTPUT,
            persona: AgentPersona::recipe_creator(),
        },
        GenerationStep {
            name: NUTRITION_ANALYSIS_PROMPT_NAME,
            description: render_nutrition_analysis_prompt(request.max_calories),
            expected_output: NUTRITION_ANALYSIS_EXPECTED_OUTPUT,
            persona: AgentPersona::nutrition_expert(),
        },
    ]
}

/// Runs recipe generation against a shared AI client.
#[derive(Clone)]
pub struct RecipePipeline {
    client: Arc<dyn AiClient>,
    settings: GenerationSettings,
}

impl RecipePipeline {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            client,
            settings: GenerationSettings::default(),
        }
    }

    /// Build a pipeline around the client selected by the environment.
    pub fn from_env() -> Result<Self, GenerationError> {
        Ok(Self::new(create_client_from_env()?))
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Generate recipes and their nutrition analysis.
    ///
    /// The request is validated before any model call. `recipe` is the
    /// creation step's output and `nutrition` is the analysis step's own
    /// output. Every call hits the model; nothing is cached.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<RecipeResult, RecipeError> {
        request.validate()?;

        let steps = recipe_steps(request);
        let outputs = run_steps(self.client.as_ref(), &steps, self.settings).await?;

        let mut outputs = outputs.into_iter();
        match (outputs.next(), outputs.next()) {
            (Some(recipe), Some(nutrition)) => {
                let usage = recipe.usage + nutrition.usage;
                tracing::info!(
                    total_tokens = usage.total_tokens,
                    ingredients = request.ingredients.len(),
                    "recipe generated"
                );
                Ok(RecipeResult {
                    recipe: recipe.content,
                    nutrition: nutrition.content,
                })
            }
            (first, _) => Err(GenerationError::Incomplete {
                expected: steps.len(),
                got: usize::from(first.is_some()),
            }
            .into()),
        }
    }
}
