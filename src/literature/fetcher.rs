// file: src/literature/fetcher.rs
// description: per-query literature retrieval with failure isolation
// reference: sequential aggregation in query order

use super::LiteratureSearch;
use crate::error::LiteratureError;
use crate::models::Document;
use tracing::{debug, info, warn};

/// A query whose contribution was dropped.
#[derive(Debug)]
pub struct QueryFailure {
    pub query: String,
    pub error: LiteratureError,
}

#[derive(Debug, Default)]
pub struct FetchReport {
    pub documents: Vec<Document>,
    pub failures: Vec<QueryFailure>,
    pub queries_attempted: usize,
}

pub struct LiteratureFetcher {
    source: Box<dyn LiteratureSearch>,
    max_results: usize,
}

impl LiteratureFetcher {
    pub fn new(source: Box<dyn LiteratureSearch>, max_results: usize) -> Self {
        Self {
            source,
            max_results,
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub async fn fetch(&self, queries: &[String]) -> Vec<Document> {
        self.fetch_with_report(queries).await.documents
    }

    /// Queries run one at a time, each trimmed of surrounding whitespace.
    /// Documents keep query order, then the service's order within each
    /// query. A failing query is logged and skipped.
    pub async fn fetch_with_report(&self, queries: &[String]) -> FetchReport {
        let mut report = FetchReport::default();

        for raw in queries {
            let query = raw.trim();
            if query.is_empty() {
                debug!("Skipping blank query");
                continue;
            }

            report.queries_attempted += 1;

            match self.source.search(query, self.max_results).await {
                Ok(articles) => {
                    debug!("Query '{}' returned {} articles", query, articles.len());
                    report
                        .documents
                        .extend(articles.into_iter().map(Document::from));
                }
                Err(error) => {
                    warn!("Error fetching articles for query '{}': {}", query, error);
                    report.failures.push(QueryFailure {
                        query: query.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            "Fetched {} documents from {} queries ({} failed)",
            report.documents.len(),
            report.queries_attempted,
            report.failures.len()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PubMedArticle;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    /// Returns `per_query` articles titled `<query> #n`; fails for listed queries.
    struct ScriptedSearch {
        per_query: usize,
        failing: Vec<&'static str>,
        calls: Arc<Mutex<Vec<(String, usize)>>>,
    }

    #[async_trait]
    impl LiteratureSearch for ScriptedSearch {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> Result<Vec<PubMedArticle>, LiteratureError> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), max_results));

            if self.failing.iter().any(|f| *f == query) {
                return Err(LiteratureError::Request("connection reset".to_string()));
            }

            Ok((1..=self.per_query.min(max_results))
                .map(|n| PubMedArticle {
                    title: Some(format!("{} #{}", query, n)),
                    abstract_text: Some(format!("abstract {}", n)),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn fetcher(
        per_query: usize,
        failing: Vec<&'static str>,
    ) -> (LiteratureFetcher, Arc<Mutex<Vec<(String, usize)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let source = ScriptedSearch {
            per_query,
            failing,
            calls: calls.clone(),
        };
        (LiteratureFetcher::new(Box::new(source), 3), calls)
    }

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|q| q.to_string()).collect()
    }

    fn titles(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_failing_query_is_isolated() {
        let (fetcher, calls) = fetcher(2, vec!["B"]);
        let report = fetcher.fetch_with_report(&queries(&["A", "B", "C"])).await;

        assert_eq!(titles(&report.documents), vec!["A #1", "A #2", "C #1", "C #2"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].query, "B");
        assert_eq!(report.queries_attempted, 3);
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_queries_make_no_calls() {
        let (fetcher, calls) = fetcher(2, vec![]);
        let docs = fetcher.fetch(&[]).await;

        assert!(docs.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queries_are_trimmed_and_capped() {
        let (fetcher, calls) = fetcher(10, vec![]);
        let docs = fetcher
            .fetch(&queries(&["  Cancer  ", "   ", " Breast  Neoplasms\n"]))
            .await;

        assert_eq!(docs.len(), 6);
        assert_eq!(
            calls.lock().unwrap().clone(),
            vec![
                ("Cancer".to_string(), 3),
                ("Breast  Neoplasms".to_string(), 3)
            ]
        );
    }

    #[tokio::test]
    async fn test_all_queries_failing_yields_empty() {
        let (fetcher, _) = fetcher(2, vec!["A", "B"]);
        let report = fetcher.fetch_with_report(&queries(&["A", "B"])).await;

        assert!(report.documents.is_empty());
        assert_eq!(report.failures.len(), 2);
    }
}
