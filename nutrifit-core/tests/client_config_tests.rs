//! Client selection from the environment.
//!
//! Everything lives in one test because it mutates process-wide variables.

use std::env;

use nutrifit_core::ai::{AiError, ConfigError};
use nutrifit_core::{GenerationError, RecipePipeline, RecipeRequest};

fn config_error(result: Result<RecipePipeline, GenerationError>) -> ConfigError {
    match result {
        Err(GenerationError::Client(AiError::Config(e))) => e,
        Err(other) => panic!("expected client configuration error, got {:?}", other),
        Ok(_) => panic!("expected client configuration error, got a pipeline"),
    }
}

#[tokio::test]
async fn test_pipeline_from_env() {
    env::set_var("NUTRIFIT_AI_PROVIDER", "claude");
    assert!(matches!(
        config_error(RecipePipeline::from_env()),
        ConfigError::UnknownProvider(p) if p == "claude"
    ));

    env::set_var("NUTRIFIT_AI_PROVIDER", "groq");
    env::remove_var("GROQ_API_KEY");
    assert!(matches!(
        config_error(RecipePipeline::from_env()),
        ConfigError::MissingEnvVar(var) if var == "GROQ_API_KEY"
    ));

    env::set_var("NUTRIFIT_AI_PROVIDER", "fake");
    let pipeline = match RecipePipeline::from_env() {
        Ok(pipeline) => pipeline,
        Err(e) => panic!("fake provider should need no configuration: {}", e),
    };
    let result = pipeline
        .generate(&RecipeRequest::new(vec!["rice".to_string()]))
        .await
        .unwrap();
    assert!(result.recipe.contains("## Ingredients"));
    assert!(result.nutrition.contains("Calories"));

    env::remove_var("NUTRIFIT_AI_PROVIDER");
}
