// file: src/pipeline/orchestrator.rs
// description: coordinates keyword generation, literature retrieval, and answer synthesis
// reference: orchestrates the question answering workflow for a single run

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::generation::{GenerationClient, GenerationOptions};
use crate::literature::LiteratureFetcher;
use crate::models::{Document, parse_queries};
use crate::pipeline::stats::{RunStats, Stage};
use crate::prompts::{render_answer_prompt, render_keyword_prompt};
use crate::utils::{OperationTimer, Validator};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const SLOW_GENERATION: Duration = Duration::from_secs(30);

/// Result of one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub question: String,
    pub answer: String,
    pub stats: RunStats,
}

/// One question's worth of collaborators.
///
/// Running consumes the pipeline, so a pipeline never serves two questions
/// and nothing carries over between runs.
pub struct Pipeline {
    keyword_llm: GenerationClient,
    answer_llm: GenerationClient,
    fetcher: LiteratureFetcher,
    keyword_options: GenerationOptions,
    answer_options: GenerationOptions,
}

impl Pipeline {
    pub fn new(
        keyword_llm: GenerationClient,
        answer_llm: GenerationClient,
        fetcher: LiteratureFetcher,
        settings: &GenerationConfig,
    ) -> Self {
        Self {
            keyword_llm,
            answer_llm,
            fetcher,
            keyword_options: GenerationOptions {
                max_output_tokens: settings.keyword_max_tokens,
            },
            answer_options: GenerationOptions::with_max_output_tokens(settings.answer_max_tokens),
        }
    }

    pub async fn answer_question(self, question: &str) -> Result<String> {
        Ok(self.run(question).await?.answer)
    }

    pub async fn run(self, question: &str) -> Result<RunOutcome> {
        Validator::validate_question(question)?;

        let run_id = Uuid::new_v4();
        let mut stats = RunStats::new();
        info!(
            "Run {} started with model {} (max {} results per query): {}",
            run_id,
            self.keyword_llm.model(),
            self.fetcher.max_results(),
            Validator::truncate_text(question, 120)
        );

        let timer = OperationTimer::new(Stage::RenderKeywordPrompt.name());
        let keyword_prompt = render_keyword_prompt(question);
        stats.record_stage(Stage::RenderKeywordPrompt, timer.finish());

        let timer = OperationTimer::new(Stage::GenerateKeywords.name());
        let raw_keywords = self
            .keyword_llm
            .generate(&keyword_prompt, &self.keyword_options)
            .await?;
        timer.warn_if_slow(SLOW_GENERATION);
        stats.record_stage(Stage::GenerateKeywords, timer.finish());
        debug!("Keyword stage output: {:?}", raw_keywords);

        let timer = OperationTimer::new(Stage::ParseQueries.name());
        let queries = parse_queries(&raw_keywords);
        stats.queries_parsed = queries.len();
        stats.record_stage(Stage::ParseQueries, timer.finish_with_count(queries.len()));
        info!("Run {} searching with queries {:?}", run_id, queries);

        let timer = OperationTimer::new(Stage::FetchArticles.name());
        let report = self.fetcher.fetch_with_report(&queries).await;
        stats.queries_failed = report.failures.len();
        stats.documents_fetched = report.documents.len();
        stats.documents_without_abstract = report
            .documents
            .iter()
            .filter(|doc| !doc.has_abstract())
            .count();
        stats.record_stage(
            Stage::FetchArticles,
            timer.finish_with_count(report.documents.len()),
        );
        let documents: Vec<Document> = report.documents;

        let timer = OperationTimer::new(Stage::RenderAnswerPrompt.name());
        let answer_prompt = render_answer_prompt(question, &documents);
        stats.record_stage(Stage::RenderAnswerPrompt, timer.finish());

        let timer = OperationTimer::new(Stage::GenerateAnswer.name());
        let answer = self
            .answer_llm
            .generate(&answer_prompt, &self.answer_options)
            .await?;
        timer.warn_if_slow(SLOW_GENERATION);
        stats.record_stage(Stage::GenerateAnswer, timer.finish());

        stats.log_summary(&run_id);

        Ok(RunOutcome {
            run_id,
            question: question.to_string(),
            answer,
            stats,
        })
    }
}
