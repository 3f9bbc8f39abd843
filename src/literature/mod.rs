// file: src/literature/mod.rs
// description: literature search collaborator interface, PubMed client and fetcher
// reference: https://www.ncbi.nlm.nih.gov/books/NBK25501/

mod fetcher;
mod pubmed;

pub use fetcher::{FetchReport, LiteratureFetcher, QueryFailure};
pub use pubmed::PubMedClient;

use crate::error::LiteratureError;
use crate::models::PubMedArticle;
use async_trait::async_trait;

/// A biomedical literature search service.
#[async_trait]
pub trait LiteratureSearch: Send + Sync {
    /// Returns at most `max_results` articles for `query`, in service order.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<PubMedArticle>, LiteratureError>;
}
