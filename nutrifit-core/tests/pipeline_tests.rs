//! End-to-end pipeline tests against the fake AI client.

use std::sync::Arc;

use nutrifit_core::ai::{AiClient, FakeAiClient, Role};
use nutrifit_core::{
    GenerationError, GenerationSettings, RecipeError, RecipePipeline, RecipeRequest, SkillLevel,
    ValidationError,
};

const RECIPE_TEXT: &str = "# Chicken Tomato Rice\n\n## Description\nSimple and quick.";
const NUTRITION_TEXT: &str = "## Nutritional Information (per serving)\n\n- Calories: 480 kcal";

fn stub() -> Arc<FakeAiClient> {
    let mut client = FakeAiClient::new();
    client.add_response("Create 2 different", RECIPE_TEXT);
    client.add_response("Analyze the nutritional content", NUTRITION_TEXT);
    Arc::new(client)
}

fn sample_request() -> RecipeRequest {
    RecipeRequest::new(vec![
        "tomatoes".to_string(),
        "chicken".to_string(),
        "rice".to_string(),
    ])
    .with_max_calories(500)
    .with_max_cooking_time(30)
    .with_skill_level(SkillLevel::Intermediate)
}

fn pipeline(client: &Arc<FakeAiClient>) -> RecipePipeline {
    let client: Arc<dyn AiClient> = client.clone();
    RecipePipeline::new(client)
}

#[tokio::test]
async fn test_generate_returns_both_step_outputs() {
    let client = stub();

    let result = pipeline(&client).generate(&sample_request()).await.unwrap();

    assert_eq!(result.recipe, RECIPE_TEXT);
    assert_eq!(result.nutrition, NUTRITION_TEXT);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_steps_run_in_order_with_context_carried() {
    let client = stub();

    pipeline(&client).generate(&sample_request()).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls[0].prompt_name, "recipe_creation");
    assert_eq!(calls[1].prompt_name, "nutrition_analysis");

    // The analysis conversation replays the creation task and its answer.
    let messages = &calls[1].request.messages;
    assert_eq!(messages[0].role, Role::System);
    assert!(messages[0].content.contains("Nutrition Expert"));
    assert_eq!(messages[1].role, Role::User);
    assert!(messages[1].content.contains("tomatoes, chicken, rice"));
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].content, RECIPE_TEXT);
    assert_eq!(messages[3].role, Role::User);
    assert!(messages[3].content.contains("Maximum allowed calories: 500"));
}

#[tokio::test]
async fn test_second_step_failure_returns_no_partial_result() {
    let mut client = FakeAiClient::new().failing_on_call(2);
    client.add_response("Create 2 different", RECIPE_TEXT);
    let client = Arc::new(client);

    let err = pipeline(&client)
        .generate(&sample_request())
        .await
        .unwrap_err();

    match err {
        RecipeError::Generation(GenerationError::Step { step, .. }) => {
            assert_eq!(step, "nutrition_analysis")
        }
        other => panic!("expected generation error, got {:?}", other),
    }
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_empty_ingredients_never_reach_the_model() {
    let client = stub();
    let request = RecipeRequest::new(vec![]);

    let err = pipeline(&client).generate(&request).await.unwrap_err();

    assert!(matches!(
        err,
        RecipeError::Validation(ValidationError::EmptyIngredients)
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_out_of_range_request_never_reaches_the_model() {
    let client = stub();
    let request = sample_request().with_max_calories(5000);

    let err = pipeline(&client).generate(&request).await.unwrap_err();

    assert!(matches!(
        err,
        RecipeError::Validation(ValidationError::CaloriesOutOfRange { .. })
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_identical_requests_are_not_cached() {
    let client = stub();
    let pipeline = pipeline(&client);

    let first = pipeline.generate(&sample_request()).await.unwrap();
    let second = pipeline.generate(&sample_request()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client.call_count(), 4);
}

#[tokio::test]
async fn test_settings_forwarded_to_every_step() {
    let client = stub();
    let settings = GenerationSettings {
        temperature: Some(0.8),
        max_tokens: Some(2048),
    };

    pipeline(&client)
        .with_settings(settings)
        .generate(&sample_request())
        .await
        .unwrap();

    for call in client.calls() {
        assert_eq!(call.request.temperature, Some(0.8));
        assert_eq!(call.request.max_tokens, Some(2048));
    }
}
