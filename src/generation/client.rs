// file: src/generation/client.rs
// description: fixed-model wrapper returning the primary completion

use super::{GenerationOptions, TextGenerator};
use crate::error::GenerationError;
use tracing::debug;

pub struct GenerationClient {
    generator: Box<dyn TextGenerator>,
    model: String,
}

impl GenerationClient {
    pub fn new(generator: Box<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates a completion for `prompt` and returns the first one.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        debug!(
            "Requesting completion from {} for {} chars (max tokens: {:?})",
            self.model,
            prompt.len(),
            options.max_output_tokens
        );

        let completions = self.generator.complete(prompt, &self.model, options).await?;

        let first = completions
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyCompletion)?;

        debug!("Received completion of {} chars", first.len());
        Ok(first)
    }
}
