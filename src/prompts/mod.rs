// file: src/prompts/mod.rs
// description: keyword extraction and answer synthesis prompts
// reference: prompt builder with named substitution points

mod template;

pub use template::PromptTemplate;

use crate::models::Document;

pub const KEYWORD_TEMPLATE: &str = r#"
Convert the question into 3-5 keywords for PubMed search.
Example:
Question: "What are the latest treatments for major depressive disorder?"
Keywords: Antidepressive Agents, Depressive Disorder, Major, Treatment-Resistant Depression
---
Question: {question}
Keywords:
"#;

pub const ANSWER_TEMPLATE: &str = r#"
Answer the question based on the provided articles. If insufficient, use your knowledge.
Question: {question}
Articles:
{articles}
Answer:
"#;

const ARTICLE_TEMPLATE: &str = "  Title: {title}\n  Abstract: {content}\n  Keywords: {keywords}\n";

/// Prompt asking the model for comma separated PubMed keywords.
pub fn render_keyword_prompt(question: &str) -> String {
    PromptTemplate::new(KEYWORD_TEMPLATE).render(&[("question", question)])
}

/// Prompt asking the model to answer from the retrieved documents, in order.
pub fn render_answer_prompt(question: &str, articles: &[Document]) -> String {
    let article_template = PromptTemplate::new(ARTICLE_TEMPLATE);

    let blocks: String = articles
        .iter()
        .map(|doc| {
            let keywords = doc.keywords_joined();
            article_template.render(&[
                ("title", doc.title.as_str()),
                ("content", doc.content.as_str()),
                ("keywords", keywords.as_str()),
            ])
        })
        .collect();

    PromptTemplate::new(ANSWER_TEMPLATE)
        .render(&[("question", question), ("articles", blocks.as_str())])
}
