// file: src/pipeline/stats.rs
// description: per-run statistics and stage timings for one answered question
// reference: tracks processing metrics for a single pipeline execution

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    RenderKeywordPrompt,
    GenerateKeywords,
    ParseQueries,
    FetchArticles,
    RenderAnswerPrompt,
    GenerateAnswer,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::RenderKeywordPrompt => "render_keyword_prompt",
            Stage::GenerateKeywords => "generate_keywords",
            Stage::ParseQueries => "parse_queries",
            Stage::FetchArticles => "fetch_articles",
            Stage::RenderAnswerPrompt => "render_answer_prompt",
            Stage::GenerateAnswer => "generate_answer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub queries_parsed: usize,
    pub queries_failed: usize,
    pub documents_fetched: usize,
    pub documents_without_abstract: usize,
    pub stage_timings_ms: Vec<(Stage, u64)>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_stage(&mut self, stage: Stage, elapsed: Duration) {
        self.stage_timings_ms
            .push((stage, elapsed.as_millis() as u64));
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.stage_timings_ms.iter().map(|(_, ms)| ms).sum()
    }

    pub fn fetch_success_rate(&self) -> f64 {
        if self.queries_parsed == 0 {
            return 0.0;
        }
        let succeeded = self.queries_parsed.saturating_sub(self.queries_failed);
        (succeeded as f64 / self.queries_parsed as f64) * 100.0
    }

    pub fn log_summary(&self, run_id: &Uuid) {
        info!(
            "Run {} complete: {} queries ({} failed, {:.0}% ok), {} documents ({} without abstract), {} ms",
            run_id,
            self.queries_parsed,
            self.queries_failed,
            self.fetch_success_rate(),
            self.documents_fetched,
            self.documents_without_abstract,
            self.total_duration_ms()
        );
    }
}
