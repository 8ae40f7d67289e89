pub mod models;
pub mod prompt;
pub mod providers;

use crate::config::LlmConfig;
use async_trait::async_trait;
use models::{SqlGenerationInput, SqlGenerationOutput};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum LlmError {
    ConnectionError(String),
    ResponseError(String),
    ConfigError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ConnectionError(msg) => write!(f, "LLM connection error: {}", msg),
            LlmError::ResponseError(msg) => write!(f, "LLM response error: {}", msg),
            LlmError::ConfigError(msg) => write!(f, "LLM configuration error: {}", msg),
        }
    }
}

impl Error for LlmError {}

/// Turns a natural-language question into a candidate SQL statement.
///
/// Output is untrusted and must pass the safety gate before it is executed.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate_sql(
        &self,
        input: SqlGenerationInput<'_>,
    ) -> Result<SqlGenerationOutput, LlmError>;
}

pub struct LlmManager {
    generator: Box<dyn SqlGenerator + Send + Sync>,
    backend: String,
}

impl LlmManager {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let generator: Box<dyn SqlGenerator + Send + Sync> = match config.backend.as_str() {
            "gemini" => Box::new(providers::gemini::GeminiProvider::new(config)?),
            "remote" => Box::new(providers::remote::RemoteLlmProvider::new(config)?),
            "ollama" => Box::new(providers::ollama::OllamaProvider::new(config)?),
            _ => {
                return Err(LlmError::ConfigError(format!(
                    "Unsupported LLM backend: {}",
                    config.backend
                )))
            }
        };

        Ok(Self {
            generator,
            backend: config.backend.clone(),
        })
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }
}

#[async_trait]
impl SqlGenerator for LlmManager {
    async fn generate_sql(
        &self,
        input: SqlGenerationInput<'_>,
    ) -> Result<SqlGenerationOutput, LlmError> {
        self.generator.generate_sql(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(backend: &str) -> LlmConfig {
        LlmConfig {
            backend: backend.to_string(),
            model: "test-model".to_string(),
            api_key: Some("secret".to_string()),
            api_url: Some("http://localhost:9999/v1/chat/completions".to_string()),
            temperature: 0.0,
        }
    }

    #[test]
    fn builds_each_supported_backend() {
        for backend in ["gemini", "remote", "ollama"] {
            let manager = LlmManager::new(&llm_config(backend)).expect("backend should build");
            assert_eq!(manager.backend(), backend);
        }
    }

    #[test]
    fn unknown_backend_is_a_config_error() {
        let err = LlmManager::new(&llm_config("local")).err().unwrap();
        assert!(matches!(err, LlmError::ConfigError(_)));
        assert_eq!(
            err.to_string(),
            "LLM configuration error: Unsupported LLM backend: local"
        );
    }

    #[test]
    fn remote_backend_requires_key_and_url() {
        let mut config = llm_config("remote");
        config.api_key = None;
        assert!(LlmManager::new(&config).is_err());

        let mut config = llm_config("remote");
        config.api_url = None;
        assert!(LlmManager::new(&config).is_err());
    }

    #[test]
    fn gemini_backend_requires_key() {
        let mut config = llm_config("gemini");
        config.api_key = None;
        assert!(matches!(
            LlmManager::new(&config).err(),
            Some(LlmError::ConfigError(_))
        ));
    }
}
