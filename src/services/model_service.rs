use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::quiz_prompt;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, FormatVariant};

/// One request to the generation collaborator.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub topic: String,
    pub level: Difficulty,
    pub count: usize,
    pub variant: FormatVariant,
}

/// Narrow seam to the external text-generation service. The quiz service
/// is the sole caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate_quiz_text(&self, request: &GenerationRequest) -> AppResult<String>;
}

// Gemini wire format.

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Deserialize, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

pub struct GeminiModelService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiModelService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiModelService {
    async fn generate_quiz_text(&self, request: &GenerationRequest) -> AppResult<String> {
        let prompt = quiz_prompt::build_quiz_prompt(request);
        log::debug!(
            "Requesting {} questions on '{}' from Gemini model {}",
            request.count,
            request.topic,
            self.model
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.7,
                max_output_tokens: 4096,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose_secret()
        );

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GeminiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(AppError::GenerationFailure(format!(
                "Gemini request failed with {}: {}",
                status, detail
            )));
        }

        let parsed: GeminiResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                AppError::GenerationFailure("Gemini response contained no candidates".to_string())
            })?;

        log::debug!("Gemini returned {} characters", text.len());
        Ok(text)
    }
}

// OpenAI-compatible chat wire format.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenAiModelService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiModelService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl GenerationClient for OpenAiModelService {
    async fn generate_quiz_text(&self, request: &GenerationRequest) -> AppResult<String> {
        let prompt = quiz_prompt::build_quiz_prompt(request);
        log::debug!(
            "Requesting {} questions on '{}' from OpenAI model {}",
            request.count,
            request.topic,
            self.model
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationFailure(format!(
                "OpenAI request failed with {}: {}",
                status, text
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::GenerationFailure("OpenAI response contained no choices".to_string())
            })?;

        log::debug!("OpenAI returned {} characters", text.len());
        Ok(text)
    }
}
