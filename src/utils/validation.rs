// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};

/// Message returned to callers that submit no question.
pub const QUESTION_REQUIRED: &str = "Question is required";

pub struct Validator;

impl Validator {
    pub fn validate_question(question: &str) -> Result<()> {
        if question.trim().is_empty() {
            return Err(PipelineError::Validation(QUESTION_REQUIRED.to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(PipelineError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((idx, _)) => format!("{}...", &text[..idx]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_question() {
        assert!(Validator::validate_question("What is insulin resistance?").is_ok());
        assert!(Validator::validate_question("").is_err());
        assert!(Validator::validate_question("  \n\t").is_err());
    }

    #[test]
    fn test_question_required_message() {
        match Validator::validate_question("") {
            Err(PipelineError::Validation(msg)) => assert_eq!(msg, QUESTION_REQUIRED),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(Validator::validate_port(8000).is_ok());
        assert!(Validator::validate_port(0).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("αβγδε", 3), "αβγ...");
    }
}
