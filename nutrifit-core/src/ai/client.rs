//! AI client implementation for OpenAI-compatible chat APIs (Groq, OpenAI).

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use thiserror::Error;

use super::config::AiConfig;
use super::types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

/// Trait for AI clients.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// The `prompt_name` identifies which task is being run, for logging.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
///
/// Authentication, transport retries and timeouts are whatever
/// `async-openai` does by default.
pub struct OpenAiCompatibleClient {
    client: Client<OpenAIConfig>,
    config: AiConfig,
}

impl OpenAiCompatibleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config);

        Self { client, config }
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build system message: {}", e))),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e))),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Api(format!("Failed to build assistant message: {}", e))),
        }
    }
}

#[async_trait]
impl AiClient for OpenAiCompatibleClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder
            .model(&self.config.model)
            .messages(messages)
            .temperature(request.temperature.unwrap_or(self.config.temperature));

        if let Some(max_tokens) = request.max_tokens.or(self.config.max_tokens) {
            req_builder.max_completion_tokens(max_tokens);
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(
            prompt_name = prompt_name,
            provider = %self.config.provider,
            model = &self.config.model,
            messages = request.messages.len(),
            "Calling AI API"
        );

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| AiError::Api(e.to_string()))?;

        // The model's text is passed through untouched, even when empty.
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ProviderKind;

    #[test]
    fn test_message_conversion_keeps_roles() {
        let system = OpenAiCompatibleClient::to_openai_message(&ChatMessage::system("s")).unwrap();
        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));

        let user = OpenAiCompatibleClient::to_openai_message(&ChatMessage::user("u")).unwrap();
        assert!(matches!(user, ChatCompletionRequestMessage::User(_)));

        let assistant =
            OpenAiCompatibleClient::to_openai_message(&ChatMessage::assistant("a")).unwrap();
        assert!(matches!(assistant, ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn test_model_name_from_config() {
        let client = OpenAiCompatibleClient::new(AiConfig {
            provider: ProviderKind::Groq,
            api_key: "test".to_string(),
            model: "llama3-70b-8192".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.8,
            max_tokens: None,
        });
        assert_eq!(client.model_name(), "llama3-70b-8192");
    }
}
