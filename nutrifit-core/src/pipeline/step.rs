//! Generation step and supporting types.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{render_persona_system_prompt, AgentPersona};
use crate::ai::{ChatMessage, ChatRequest, Usage};

/// Sampling knobs forwarded with every step's request.
///
/// `None` defers to the client's configured default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationSettings {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// One persona-bound prompt submitted to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStep {
    /// Unique identifier for this step (e.g., "recipe_creation")
    pub name: &'static str,
    /// Rendered task prompt
    pub description: String,
    /// Short description of the expected answer, given to the persona
    pub expected_output: &'static str,
    pub persona: AgentPersona,
}

/// Text produced by one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    pub step_name: String,
    /// The task the step was given, replayed as context for later steps
    pub task: String,
    /// Raw model output
    pub content: String,
    pub usage: Usage,
}

impl GenerationStep {
    /// Build the conversation for this step.
    ///
    /// The persona's system message comes first, then every prior step's task
    /// and answer in execution order, then this step's task. Later steps see
    /// earlier results only through `prior`.
    pub fn to_chat_request(&self, prior: &[StepOutput], settings: GenerationSettings) -> ChatRequest {
        let mut messages = Vec::with_capacity(prior.len() * 2 + 2);
        messages.push(ChatMessage::system(render_persona_system_prompt(
            &self.persona,
            self.expected_output,
        )));

        for output in prior {
            messages.push(ChatMessage::user(output.task.clone()));
            messages.push(ChatMessage::assistant(output.content.clone()));
        }

        messages.push(ChatMessage::user(self.description.clone()));

        ChatRequest {
            messages,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}
