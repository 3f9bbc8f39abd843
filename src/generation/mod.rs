// file: src/generation/mod.rs
// description: generative-text collaborator interface and clients
// reference: https://huggingface.co/docs/api-inference

mod client;
mod huggingface;

pub use client::GenerationClient;
pub use huggingface::HuggingFaceClient;

use crate::error::GenerationError;
use async_trait::async_trait;

/// Per-call generation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Caps the completion length; `None` leaves it to the service.
    pub max_output_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn with_max_output_tokens(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens: Some(max_output_tokens),
        }
    }
}

/// A generative-text service.
///
/// Implementations hold no per-call state: every `complete` is independently
/// authenticated and may be issued from any task.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns all completions the service produced for `prompt`, in order.
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<String>, GenerationError>;
}

#[async_trait]
impl TextGenerator for Box<dyn TextGenerator> {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<String>, GenerationError> {
        (**self).complete(prompt, model, options).await
    }
}
