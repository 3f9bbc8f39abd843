// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod generation;
pub mod literature;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod server;
pub mod utils;

pub use config::{Config, GenerationConfig, LiteratureConfig, ServerConfig};
pub use error::{GenerationError, LiteratureError, PipelineError, Result};
pub use generation::{GenerationClient, GenerationOptions, HuggingFaceClient, TextGenerator};
pub use literature::{LiteratureFetcher, LiteratureSearch, PubMedClient};
pub use models::{Document, PubMedArticle, parse_queries};
pub use pipeline::{Pipeline, PipelineFactory, RunOutcome, RunStats};
pub use prompts::{render_answer_prompt, render_keyword_prompt};
pub use utils::{HealthReport, Validator};
