// file: src/generation/huggingface.rs
// description: Hugging Face serverless inference API integration for text generation
// reference: https://huggingface.co/docs/api-inference/tasks/text-generation

use super::{GenerationOptions, TextGenerator};
use crate::config::GenerationConfig;
use crate::error::{GenerationError, PipelineError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Failure { error: String },
}

pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::new(&config.base_url, api_key, config.timeout()).map_err(PipelineError::from)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn complete(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> std::result::Result<Vec<String>, GenerationError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: options.max_output_tokens,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        debug!("POST {} ({} prompt chars)", self.endpoint(model), prompt.len());

        let response = self
            .client
            .post(self.endpoint(model))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_completions(&body)
    }
}

fn parse_completions(body: &str) -> std::result::Result<Vec<String>, GenerationError> {
    let parsed: InferenceResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    match parsed {
        InferenceResponse::Batch(items) => Ok(items.into_iter().map(|g| g.generated_text).collect()),
        InferenceResponse::Single(item) => Ok(vec![item.generated_text]),
        InferenceResponse::Failure { error } => Err(GenerationError::Api {
            status: StatusCode::OK.as_u16(),
            message: error,
        }),
    }
}
