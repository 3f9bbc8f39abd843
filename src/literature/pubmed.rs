// file: src/literature/pubmed.rs
// description: PubMed E-utilities client (esearch for ids, efetch for abstracts)
// reference: https://www.ncbi.nlm.nih.gov/books/NBK25499/

use super::LiteratureSearch;
use crate::config::LiteratureConfig;
use crate::error::LiteratureError;
use crate::models::PubMedArticle;
use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

pub struct PubMedClient {
    client: Client,
    base_url: String,
    tool: String,
    email: String,
    api_key: Option<String>,
}

impl PubMedClient {
    pub fn new(config: &LiteratureConfig) -> Result<Self, LiteratureError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tool: config.tool.clone(),
            email: config.email.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Client identity sent with every request, as NCBI asks of automated tools.
    fn identity_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("tool", self.tool.clone()),
            ("email", self.email.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    async fn get_text(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, LiteratureError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LiteratureError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    async fn esearch(&self, query: &str, max_results: usize) -> Result<Vec<String>, LiteratureError> {
        let mut params = self.identity_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        let body = self.get_text("esearch.fcgi", &params).await?;
        let ids = parse_esearch_json(&body)?;

        debug!("PubMed esearch for '{}' returned ids {:?}", query, ids);
        Ok(ids)
    }

    async fn efetch(&self, ids: &[String]) -> Result<Vec<PubMedArticle>, LiteratureError> {
        let mut params = self.identity_params();
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));

        let body = self.get_text("efetch.fcgi", &params).await?;
        parse_efetch_xml(&body)
    }
}

#[async_trait]
impl LiteratureSearch for PubMedClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<PubMedArticle>, LiteratureError> {
        let ids = self.esearch(query, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut articles = self.efetch(&ids).await?;
        articles.truncate(max_results);
        Ok(articles)
    }
}

fn parse_esearch_json(body: &str) -> Result<Vec<String>, LiteratureError> {
    let response: EsearchResponse =
        serde_json::from_str(body).map_err(|e| LiteratureError::Malformed(e.to_string()))?;

    if let Some(error) = response.esearchresult.error {
        return Err(LiteratureError::Malformed(error));
    }

    Ok(response.esearchresult.idlist)
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Pmid,
    Title,
    Abstract,
    Keyword,
}

/// Parses an efetch `PubmedArticleSet` into articles, in document order.
///
/// Inline markup inside titles and abstracts (`<i>`, `<sup>`, ...) is
/// flattened to its text. Structured abstracts are joined section by section
/// with newlines. Only the first PMID of an article is kept, later ones
/// belong to comments and corrections.
fn parse_efetch_xml(xml: &str) -> Result<Vec<PubMedArticle>, LiteratureError> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut current: Option<PubMedArticle> = None;
    let mut abstract_sections: Vec<String> = Vec::new();
    let mut field: Option<Field> = None;
    let mut inline_depth = 0usize;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| LiteratureError::Malformed(e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                if field.is_some() {
                    inline_depth += 1;
                    continue;
                }

                match e.name().as_ref() {
                    b"PubmedArticle" => {
                        current = Some(PubMedArticle::default());
                        abstract_sections.clear();
                    }
                    b"PMID" => field = Some(Field::Pmid),
                    b"ArticleTitle" => field = Some(Field::Title),
                    b"AbstractText" => field = Some(Field::Abstract),
                    b"Keyword" => field = Some(Field::Keyword),
                    _ => {}
                }
                text.clear();
            }
            Event::Text(ref e) => {
                if field.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| LiteratureError::Malformed(err.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(ref e) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                if inline_depth > 0 {
                    inline_depth -= 1;
                    continue;
                }

                if let Some(done) = field.take() {
                    let value = normalize_whitespace(&text);
                    if let Some(article) = current.as_mut()
                        && !value.is_empty()
                    {
                        match done {
                            Field::Pmid => {
                                if article.pmid.is_none() {
                                    article.pmid = Some(value);
                                }
                            }
                            Field::Title => article.title = Some(value),
                            Field::Abstract => abstract_sections.push(value),
                            Field::Keyword => article.keywords.push(value),
                        }
                    }
                    continue;
                }

                if e.name().as_ref() == b"PubmedArticle"
                    && let Some(mut article) = current.take()
                {
                    if !abstract_sections.is_empty() {
                        article.abstract_text = Some(abstract_sections.join("\n"));
                    }
                    abstract_sections.clear();
                    articles.push(article);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(articles)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
