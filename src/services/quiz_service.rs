use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, QuizItem};
use crate::services::model_service::{GenerationClient, GenerationRequest};
use crate::services::parser_service::ParserService;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Orchestrates the generation collaborator and the parser, enforcing a
/// minimum-yield policy with bounded retry.
pub struct QuizService {
    model: Arc<dyn GenerationClient>,
    max_attempts: u32,
}

impl QuizService {
    pub fn new(model: Arc<dyn GenerationClient>) -> Self {
        Self {
            model,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Produce exactly `target_count` parsed items, retrying the full
    /// request-and-parse cycle while the yield falls short. Retries are
    /// bounded; exhaustion is a typed failure, never recursion.
    pub async fn generate(
        &self,
        topic: &str,
        level: Difficulty,
        target_count: usize,
    ) -> AppResult<Vec<QuizItem>> {
        let request = GenerationRequest {
            topic: topic.to_string(),
            level,
            count: target_count,
            variant: level.format_variant(),
        };

        let mut best_yield = 0usize;
        for attempt in 1..=self.max_attempts {
            let raw = self.model.generate_quiz_text(&request).await?;
            if raw.trim().is_empty() {
                return Err(AppError::GenerationFailure(
                    "model returned empty response text".to_string(),
                ));
            }

            let (mut items, rejected) = ParserService::parse(&raw, request.variant);
            if rejected > 0 {
                log::warn!("Skipped {} malformed question segment(s)", rejected);
            }

            if items.len() >= target_count {
                items.truncate(target_count);
                log::info!(
                    "Generated {} questions on '{}' at {} level (attempt {}/{})",
                    items.len(),
                    topic,
                    level,
                    attempt,
                    self.max_attempts
                );
                return Ok(items);
            }

            best_yield = best_yield.max(items.len());
            log::warn!(
                "Attempt {}/{} yielded {} of {} questions, retrying",
                attempt,
                self.max_attempts,
                items.len(),
                target_count
            );
        }

        Err(AppError::InsufficientYield(format!(
            "produced {} of {} questions after {} attempts",
            best_yield, target_count, self.max_attempts
        )))
    }
}
