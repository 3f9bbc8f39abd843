// file: src/pipeline/testing.rs
// description: scripted collaborators for pipeline and server tests

use crate::config::{Config, GenerationConfig, LiteratureConfig};
use crate::error::{GenerationError, LiteratureError, Result};
use crate::generation::{GenerationOptions, TextGenerator};
use crate::literature::LiteratureSearch;
use crate::models::PubMedArticle;
use crate::pipeline::{Collaborators, Pipeline, PipelineFactory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn article(title: &str, abstract_text: Option<&str>, keywords: &[&str]) -> PubMedArticle {
    PubMedArticle {
        pmid: None,
        title: Some(title.to_string()),
        abstract_text: abstract_text.map(str::to_string),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

#[derive(Default)]
struct Journal {
    prompts: Mutex<Vec<String>>,
    max_tokens: Mutex<Vec<Option<u32>>>,
    searches: Mutex<Vec<String>>,
    generators_built: AtomicUsize,
    searchers_built: AtomicUsize,
}

#[derive(Clone)]
struct Script {
    keyword_reply: String,
    answer_reply: String,
    fail_keywords: bool,
    fail_answer: bool,
    articles: HashMap<String, Vec<PubMedArticle>>,
    failing_queries: Vec<String>,
    latency: Option<Duration>,
}

/// Replies to the keyword prompt and the answer prompt with fixed text, and
/// to searches from a per-query table. Records everything it is asked.
#[derive(Clone)]
pub struct MockCollaborators {
    script: Script,
    journal: Arc<Journal>,
}

impl MockCollaborators {
    pub fn new(keyword_reply: &str, answer_reply: &str) -> Self {
        Self {
            script: Script {
                keyword_reply: keyword_reply.to_string(),
                answer_reply: answer_reply.to_string(),
                fail_keywords: false,
                fail_answer: false,
                articles: HashMap::new(),
                failing_queries: Vec::new(),
                latency: None,
            },
            journal: Arc::new(Journal::default()),
        }
    }

    pub fn with_articles(mut self, query: &str, articles: Vec<PubMedArticle>) -> Self {
        self.script.articles.insert(query.to_string(), articles);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.script.failing_queries.push(query.to_string());
        self
    }

    pub fn failing_keywords(mut self) -> Self {
        self.script.fail_keywords = true;
        self
    }

    pub fn failing_answer(mut self) -> Self {
        self.script.fail_answer = true;
        self
    }

    /// Delays every completion by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.script.latency = Some(latency);
        self
    }

    pub fn pipeline(&self, config: &Config) -> Pipeline {
        PipelineFactory::with_collaborators(config.clone(), Arc::new(self.clone()))
            .create_pipeline()
            .unwrap()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.journal.prompts.lock().unwrap().clone()
    }

    pub fn max_tokens_seen(&self) -> Vec<Option<u32>> {
        self.journal.max_tokens.lock().unwrap().clone()
    }

    pub fn searched_queries(&self) -> Vec<String> {
        self.journal.searches.lock().unwrap().clone()
    }

    pub fn generators_built(&self) -> usize {
        self.journal.generators_built.load(Ordering::SeqCst)
    }

    pub fn searchers_built(&self) -> usize {
        self.journal.searchers_built.load(Ordering::SeqCst)
    }
}

impl Collaborators for MockCollaborators {
    fn text_generator(&self, _config: &GenerationConfig) -> Result<Box<dyn TextGenerator>> {
        self.journal.generators_built.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }

    fn literature_search(&self, _config: &LiteratureConfig) -> Result<Box<dyn LiteratureSearch>> {
        self.journal.searchers_built.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl TextGenerator for MockCollaborators {
    async fn complete(
        &self,
        prompt: &str,
        _model: &str,
        options: &GenerationOptions,
    ) -> std::result::Result<Vec<String>, GenerationError> {
        self.journal.prompts.lock().unwrap().push(prompt.to_string());
        self.journal
            .max_tokens
            .lock()
            .unwrap()
            .push(options.max_output_tokens);

        if let Some(latency) = self.script.latency {
            tokio::time::sleep(latency).await;
        }

        let keyword_stage = prompt.trim_end().ends_with("Keywords:");
        let (fail, reply) = if keyword_stage {
            (self.script.fail_keywords, &self.script.keyword_reply)
        } else {
            (self.script.fail_answer, &self.script.answer_reply)
        };

        if fail {
            return Err(GenerationError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(vec![reply.clone()])
    }
}

#[async_trait]
impl LiteratureSearch for MockCollaborators {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<PubMedArticle>, LiteratureError> {
        self.journal.searches.lock().unwrap().push(query.to_string());

        if self.script.failing_queries.iter().any(|q| q == query) {
            return Err(LiteratureError::Request(format!("timeout for {}", query)));
        }

        let mut articles = self.script.articles.get(query).cloned().unwrap_or_default();
        articles.truncate(max_results);
        Ok(articles)
    }
}
