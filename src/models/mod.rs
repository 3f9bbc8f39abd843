// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod article;
pub mod document;
pub mod query;

pub use article::PubMedArticle;
pub use document::{Document, NO_ABSTRACT};
pub use query::parse_queries;
