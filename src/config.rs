use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelProvider {
    Gemini,
    OpenAi,
}

impl ModelProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" => Some(ModelProvider::Gemini),
            "openai" => Some(ModelProvider::OpenAi),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProvider::Gemini => write!(f, "gemini"),
            ModelProvider::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub model_provider: ModelProvider,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub openai_base_url: String,
    pub max_generation_attempts: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            model_provider: env::var("MODEL_PROVIDER")
                .ok()
                .and_then(|p| ModelProvider::parse(&p))
                .unwrap_or(ModelProvider::Gemini),
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY").unwrap_or_default(),
            ),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            max_generation_attempts: env::var("MAX_GENERATION_ATTEMPTS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_MAX_GENERATION_ATTEMPTS),
        }
    }

    /// Validate that the selected provider is actually usable before any
    /// session starts.
    pub fn validate(&self) -> AppResult<()> {
        let key = match self.model_provider {
            ModelProvider::Gemini => self.gemini_api_key.expose_secret(),
            ModelProvider::OpenAi => self.openai_api_key.expose_secret(),
        };

        if key.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "no API key configured for provider '{}'",
                self.model_provider
            )));
        }

        if self.max_generation_attempts == 0 {
            return Err(AppError::ValidationError(
                "MAX_GENERATION_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            model_provider: ModelProvider::Gemini,
            gemini_api_key: SecretString::from("test_gemini_key".to_string()),
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_base_url: "http://localhost:9090/v1beta".to_string(),
            openai_api_key: SecretString::from("test_openai_key".to_string()),
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "http://localhost:9090/v1".to_string(),
            max_generation_attempts: 3,
        }
    }
}
