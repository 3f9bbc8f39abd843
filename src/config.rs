// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Environment variable consulted when `generation.api_key` is not configured.
pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub literature: LiteratureConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub answer_max_tokens: u32,
    /// `None` leaves the keyword stage at the service default.
    pub keyword_max_tokens: Option<u32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LiteratureConfig {
    pub base_url: String,
    pub tool: String,
    pub email: String,
    pub api_key: Option<String>,
    pub max_results: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the token, failing when none was configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::Config(format!(
                    "generation api key missing (set generation.api_key or {})",
                    API_KEY_ENV
                ))
            })
    }
}

impl LiteratureConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::load_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Merges all sources without validating, so `check-config` can report
    /// what is wrong with them.
    pub fn load_unvalidated(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MEDI_MINDS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if config.generation.api_key.is_none() {
            config.generation.api_key = std::env::var(API_KEY_ENV).ok();
        }

        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            generation: GenerationConfig {
                base_url: DEFAULT_INFERENCE_URL.to_string(),
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                answer_max_tokens: 500,
                keyword_max_tokens: None,
                timeout_secs: 60,
            },
            literature: LiteratureConfig {
                base_url: DEFAULT_EUTILS_URL.to_string(),
                tool: "HealthcareChatbot".to_string(),
                email: "your_email@example.com".to_string(),
                api_key: None,
                max_results: 3,
                timeout_secs: 30,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                request_timeout_secs: 180,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.generation.base_url)
            .and_then(|_| Validator::validate_url(&self.literature.base_url))
            .and_then(|_| Validator::validate_port(self.server.port))
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.generation.model.trim().is_empty() {
            return Err(PipelineError::Config(
                "generation.model must not be empty".to_string(),
            ));
        }

        if self.generation.answer_max_tokens == 0 {
            return Err(PipelineError::Config(
                "generation.answer_max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.literature.max_results == 0 {
            return Err(PipelineError::Config(
                "literature.max_results must be greater than 0".to_string(),
            ));
        }

        if self.generation.timeout_secs == 0
            || self.literature.timeout_secs == 0
            || self.server.request_timeout_secs == 0
        {
            return Err(PipelineError::Config(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        self.generation.require_api_key()?;

        Ok(())
    }

    /// Human readable description with secrets redacted.
    pub fn summary(&self) -> Vec<(String, String)> {
        let redact = |key: &Option<String>| match key {
            Some(k) if !k.is_empty() => "set".to_string(),
            _ => "unset".to_string(),
        };

        vec![
            ("generation.base_url".to_string(), self.generation.base_url.clone()),
            ("generation.model".to_string(), self.generation.model.clone()),
            ("generation.api_key".to_string(), redact(&self.generation.api_key)),
            (
                "generation.answer_max_tokens".to_string(),
                self.generation.answer_max_tokens.to_string(),
            ),
            ("literature.base_url".to_string(), self.literature.base_url.clone()),
            ("literature.tool".to_string(), self.literature.tool.clone()),
            (
                "literature.max_results".to_string(),
                self.literature.max_results.to_string(),
            ),
            ("literature.api_key".to_string(), redact(&self.literature.api_key)),
            ("server.bind".to_string(), self.server.bind_address()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_key() -> Config {
        let mut config = Config::default_config();
        config.generation.api_key = Some("hf_test".to_string());
        config
    }

    #[test]
    fn test_default_config_requires_api_key() {
        let config = Config::default_config();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut config = with_key();
        config.generation.api_key = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_results_rejected() {
        let mut config = with_key();
        config.literature.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = with_key();
        config.literature.base_url = "eutils.ncbi.nlm.nih.gov".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[generation]\napi_key = \"hf_from_file\"\nanswer_max_tokens = 256\n\n[literature]\nmax_results = 5\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.generation.api_key.as_deref(), Some("hf_from_file"));
        assert_eq!(config.generation.answer_max_tokens, 256);
        assert_eq!(config.generation.model, DEFAULT_MODEL);
        assert_eq!(config.literature.max_results, 5);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_unvalidated_keeps_missing_key() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[generation]\napi_key = \"\"\n").unwrap();

        let config = Config::load_unvalidated(Some(file.path())).unwrap();
        assert_eq!(config.generation.api_key.as_deref(), Some(""));
        assert!(config.validate().is_err());
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_summary_redacts_secrets() {
        let summary = with_key().summary();
        let key = summary
            .iter()
            .find(|(name, _)| name == "generation.api_key")
            .map(|(_, value)| value.as_str());
        assert_eq!(key, Some("set"));
        assert!(summary.iter().all(|(_, value)| !value.contains("hf_test")));
    }
}
