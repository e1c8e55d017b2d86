//! Sequential step executor.

use std::time::Instant;

use tracing::{info_span, Instrument};

use crate::ai::AiClient;
use crate::error::GenerationError;
use crate::pipeline::step::{GenerationSettings, GenerationStep, StepOutput};

/// Run `steps` in order against `client`.
///
/// Each step receives the outputs of every step before it. The first failure
/// aborts the run; outputs gathered up to that point are discarded.
pub async fn run_steps(
    client: &dyn AiClient,
    steps: &[GenerationStep],
    settings: GenerationSettings,
) -> Result<Vec<StepOutput>, GenerationError> {
    let mut outputs: Vec<StepOutput> = Vec::with_capacity(steps.len());

    for step in steps {
        let request = step.to_chat_request(&outputs, settings);
        let started = Instant::now();

        let response = client
            .complete(step.name, request)
            .instrument(info_span!(
                "pipeline_step",
                step = step.name,
                role = %step.persona.role,
                model = client.model_name(),
            ))
            .await
            .map_err(|source| GenerationError::Step {
                step: step.name,
                source,
            })?;

        tracing::info!(
            step = step.name,
            duration_ms = started.elapsed().as_millis() as u64,
            total_tokens = response.usage.total_tokens,
            output_chars = response.content.len(),
            "pipeline step completed"
        );

        outputs.push(StepOutput {
            step_name: step.name.to_string(),
            task: step.description.clone(),
            content: response.content,
            usage: response.usage,
        });
    }

    Ok(outputs)
}
