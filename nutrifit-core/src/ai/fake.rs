//! Fake AI client for testing and offline runs.
//!
//! This client returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs. Every request
//! is recorded so tests can assert on call counts and conversation contents.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A request as seen by the fake client.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt_name: String,
    pub request: ChatRequest,
}

/// A fake AI client.
///
/// Responses are matched by checking whether the last user message contains a
/// registered substring (case-insensitive, first registration wins). If no
/// match is found, returns the default response or an error.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    /// Ordered (substring, response) pairs.
    responses: Vec<(String, String)>,
    /// Response if no pattern matches.
    default_response: Option<String>,
    /// 1-based call number that should fail.
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeAiClient {
    /// Create a new FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that answers prompts containing `prompt_contains` with `response`.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Make the `call_number`-th request (1-based) fail with an API error.
    pub fn failing_on_call(mut self, call_number: usize) -> Self {
        self.fail_on_call = Some(call_number);
        self
    }

    /// Canned answers for both recipe tasks, used when `NUTRIFIT_AI_PROVIDER=fake`.
    pub fn with_recipe_responses() -> Self {
        let mut client = Self::new();

        client.add_response(
            "recipe options",
            "# Tomato Chicken Rice Bowl\n\n## Description\nA quick high-protein bowl.\n\n\
             ## Ingredients with quantity for 1 serving\n- 120g chicken breast\n- 1 tomato\n- 60g rice\n\n\
             ## Instructions\n1. Cook the rice.\n2. Sear the chicken.\n3. Add diced tomato and serve.\n\n\
             ## Cooking Time\n- Preparation: 5 minutes\n- Cooking: 20 minutes\n- Total Time: 25 minutes",
        );

        client.add_response(
            "nutritional content",
            "## Nutritional Information (per serving)\n\n- Calories: 450 kcal\n- Protein: 38g\n\
             - Carbohydrates: 48g\n- Fat: 9g\n- Fiber: 3g\n- Sodium: 420mg\n\n\
             ## Additional Notes\nFits within the calorie limit.",
        );

        client
    }

    /// Number of requests received so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let prompt = request.last_user_message().unwrap_or_default().to_string();

        let call_number = {
            let mut calls = self.lock_calls();
            calls.push(RecordedCall {
                prompt_name: prompt_name.to_string(),
                request,
            });
            calls.len()
        };

        if self.fail_on_call == Some(call_number) {
            return Err(AiError::Api(format!(
                "FakeAiClient: injected failure on call {}",
                call_number
            )));
        }

        let prompt_lower = prompt.to_lowercase();
        let matched = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone());

        match matched {
            Some(content) => Ok(ChatResponse {
                content,
                usage: Usage::default(),
            }),
            None => Err(AiError::Api(format!(
                "FakeAiClient: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(prompt: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::system("persona"), ChatMessage::user(prompt)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeAiClient::with_response("hello", "world");
        let result = client
            .complete("test", request("Say hello to the user"))
            .await
            .unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeAiClient::with_response("HELLO", "world");
        let result = client.complete("test", request("hello there")).await.unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_fake_client_matches_last_user_turn_only() {
        let mut client = FakeAiClient::new();
        client.add_response("first", "one");
        client.add_response("second", "two");

        let request = ChatRequest {
            messages: vec![
                ChatMessage::user("first task"),
                ChatMessage::assistant("one"),
                ChatMessage::user("second task"),
            ],
            ..Default::default()
        };
        let result = client.complete("test", request).await.unwrap();
        assert_eq!(result.content, "two");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeAiClient::new();
        let result = client.complete("test", request("random prompt")).await;
        assert!(result.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_client_default_response() {
        let client = FakeAiClient::new().with_default_response("default");
        let result = client.complete("test", request("random prompt")).await.unwrap();
        assert_eq!(result.content, "default");
    }

    #[tokio::test]
    async fn test_fake_client_injected_failure() {
        let client = FakeAiClient::new()
            .with_default_response("ok")
            .failing_on_call(2);

        assert!(client.complete("a", request("x")).await.is_ok());
        assert!(client.complete("b", request("y")).await.is_err());
        assert!(client.complete("c", request("z")).await.is_ok());

        let names: Vec<_> = client.calls().into_iter().map(|c| c.prompt_name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_recipe_responses() {
        let client = FakeAiClient::with_recipe_responses();

        let recipe = client
            .complete("recipe_creation", request("Create 2 different detailed recipe options"))
            .await
            .unwrap();
        assert!(recipe.content.contains("## Cooking Time"));

        let nutrition = client
            .complete(
                "nutrition_analysis",
                request("Analyze the nutritional content of each of the recipes above."),
            )
            .await
            .unwrap();
        assert!(nutrition.content.contains("Sodium"));
    }
}
