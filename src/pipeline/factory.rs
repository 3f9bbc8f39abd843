// file: src/pipeline/factory.rs
// description: builds a fresh pipeline with its own collaborators for every question
// reference: request scoped dependency construction

use crate::config::{Config, GenerationConfig, LiteratureConfig};
use crate::error::{PipelineError, Result};
use crate::generation::{GenerationClient, HuggingFaceClient, TextGenerator};
use crate::literature::{LiteratureFetcher, LiteratureSearch, PubMedClient};
use crate::pipeline::orchestrator::{Pipeline, RunOutcome};
use crate::utils::Validator;
use std::sync::Arc;

/// Source of external service clients.
pub trait Collaborators: Send + Sync {
    fn text_generator(&self, config: &GenerationConfig) -> Result<Box<dyn TextGenerator>>;

    fn literature_search(&self, config: &LiteratureConfig) -> Result<Box<dyn LiteratureSearch>>;
}

/// Real network clients for the inference API and PubMed.
pub struct HttpCollaborators;

impl Collaborators for HttpCollaborators {
    fn text_generator(&self, config: &GenerationConfig) -> Result<Box<dyn TextGenerator>> {
        Ok(Box::new(HuggingFaceClient::from_config(config)?))
    }

    fn literature_search(&self, config: &LiteratureConfig) -> Result<Box<dyn LiteratureSearch>> {
        let client = PubMedClient::new(config).map_err(|e| {
            PipelineError::Config(format!("failed to build literature client: {}", e))
        })?;
        Ok(Box::new(client))
    }
}

/// Shared, immutable entry point. Every call builds new clients, so no state
/// is shared between concurrent questions.
#[derive(Clone)]
pub struct PipelineFactory {
    config: Arc<Config>,
    collaborators: Arc<dyn Collaborators>,
}

impl PipelineFactory {
    pub fn new(config: Config) -> Self {
        Self::with_collaborators(config, Arc::new(HttpCollaborators))
    }

    pub fn with_collaborators(config: Config, collaborators: Arc<dyn Collaborators>) -> Self {
        Self {
            config: Arc::new(config),
            collaborators,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn create_pipeline(&self) -> Result<Pipeline> {
        let generation = &self.config.generation;

        let keyword_llm = GenerationClient::new(
            self.collaborators.text_generator(generation)?,
            generation.model.clone(),
        );
        let answer_llm = GenerationClient::new(
            self.collaborators.text_generator(generation)?,
            generation.model.clone(),
        );
        let fetcher = LiteratureFetcher::new(
            self.collaborators
                .literature_search(&self.config.literature)?,
            self.config.literature.max_results,
        );

        Ok(Pipeline::new(keyword_llm, answer_llm, fetcher, generation))
    }

    pub async fn run(&self, question: &str) -> Result<RunOutcome> {
        Validator::validate_question(question)?;
        self.create_pipeline()?.run(question).await
    }

    pub async fn answer_question(&self, question: &str) -> Result<String> {
        Ok(self.run(question).await?.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{MockCollaborators, article};

    fn factory(mocks: &MockCollaborators) -> PipelineFactory {
        PipelineFactory::with_collaborators(Config::default_config(), Arc::new(mocks.clone()))
    }

    #[tokio::test]
    async fn test_fresh_collaborators_per_run() {
        let mocks = MockCollaborators::new("Gout", "Colchicine and urate lowering.")
            .with_articles("Gout", vec![article("Gout management", Some("..."), &[])]);
        let factory = factory(&mocks);

        factory.answer_question("How is gout treated?").await.unwrap();
        factory.answer_question("How is gout treated?").await.unwrap();

        assert_eq!(mocks.generators_built(), 4);
        assert_eq!(mocks.searchers_built(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_runs_do_not_interfere() {
        let mocks = MockCollaborators::new("Gout", "answer");
        let factory = factory(&mocks);

        let (a, b) = tokio::join!(
            factory.answer_question("first question"),
            factory.answer_question("second question")
        );

        assert_eq!(a.unwrap(), "answer");
        assert_eq!(b.unwrap(), "answer");
        assert_eq!(mocks.generators_built(), 4);
    }

    #[tokio::test]
    async fn test_empty_question_builds_nothing() {
        let mocks = MockCollaborators::new("Gout", "answer");
        let result = factory(&mocks).answer_question("").await;

        assert!(matches!(result, Err(PipelineError::Validation(_))));
        assert_eq!(mocks.generators_built(), 0);
        assert_eq!(mocks.searchers_built(), 0);
    }

    #[test]
    fn test_http_collaborators_need_api_key() {
        let factory = PipelineFactory::new(Config::default_config());
        assert!(matches!(
            factory.create_pipeline(),
            Err(PipelineError::Config(_))
        ));

        let mut config = Config::default_config();
        config.generation.api_key = Some("hf_test".to_string());
        assert!(PipelineFactory::new(config).create_pipeline().is_ok());
    }
}
