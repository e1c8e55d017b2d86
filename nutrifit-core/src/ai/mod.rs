//! AI client module for LLM integration over OpenAI-compatible APIs.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `OpenAiCompatibleClient` for Groq / OpenAI
//! - `FakeAiClient` for tests and offline runs
//! - Configuration via environment variables
//! - Prompt templates for the recipe pipeline
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `NUTRIFIT_AI_PROVIDER` (optional): "groq" (default), "openai" or "fake"
//! - `GROQ_API_KEY` (required for groq): Your Groq API key
//! - `OPENAI_API_KEY` (required for openai): Your OpenAI API key
//! - `NUTRIFIT_AI_MODEL` (optional): Model name, e.g., "llama3-70b-8192"
//! - `NUTRIFIT_AI_BASE_URL` (optional): API base URL
//! - `NUTRIFIT_AI_TEMPERATURE` (optional): Sampling temperature
//! - `NUTRIFIT_AI_MAX_TOKENS` (optional): Completion token cap
//!
//! # Example
//!
//! ```ignore
//! use nutrifit_core::ai::{create_client_from_env, AiClient, ChatMessage, ChatRequest};
//!
//! let client = create_client_from_env()?;
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//!
//! let response = client.complete("test", request).await?;
//! println!("Response: {}", response.content);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod types;

use std::sync::Arc;

pub use client::{AiClient, AiError, OpenAiCompatibleClient};
pub use config::{AiConfig, ConfigError, ProviderKind, DEFAULT_TEMPERATURE};
pub use fake::{FakeAiClient, RecordedCall};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

/// Build the client selected by `NUTRIFIT_AI_PROVIDER`.
pub fn create_client_from_env() -> Result<Arc<dyn AiClient>, AiError> {
    let provider = ProviderKind::from_env()?;

    match provider {
        ProviderKind::Fake => Ok(Arc::new(FakeAiClient::with_recipe_responses())),
        ProviderKind::Groq | ProviderKind::OpenAi => {
            let config = AiConfig::from_env_for(provider)?;
            tracing::info!(
                provider = %config.provider,
                model = %config.model,
                "Using remote AI provider"
            );
            Ok(Arc::new(OpenAiCompatibleClient::new(config)))
        }
    }
}
