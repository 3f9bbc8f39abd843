// file: src/models/document.rs
// description: normalized retrieved-abstract record consumed by the answer prompt
// reference: internal data structures

use crate::models::PubMedArticle;
use serde::{Deserialize, Serialize};

/// Content used when an article carries no abstract.
pub const NO_ABSTRACT: &str = "No abstract available";

/// One retrieved abstract. `content` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub title: String,
    pub keywords: Vec<String>,
}

impl Document {
    pub fn new(content: Option<String>, title: Option<String>, keywords: Vec<String>) -> Self {
        let content = content
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_ABSTRACT.to_string());

        Self {
            content,
            title: title.unwrap_or_default(),
            keywords,
        }
    }

    pub fn has_abstract(&self) -> bool {
        self.content != NO_ABSTRACT
    }

    /// Keywords as shown to the answer model.
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

impl From<PubMedArticle> for Document {
    fn from(article: PubMedArticle) -> Self {
        Self::new(article.abstract_text, article.title, article.keywords)
    }
}
