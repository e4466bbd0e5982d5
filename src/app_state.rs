use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::{Config, ModelProvider},
    console::{StdinAnswerSource, TerminalView},
    errors::AppResult,
    services::{
        answer_gate_service::SharedAnswerSource,
        model_service::{GeminiModelService, GenerationClient, OpenAiModelService},
        quiz_service::QuizService,
        session_service::SessionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let model: Arc<dyn GenerationClient> = match config.model_provider {
            ModelProvider::Gemini => Arc::new(GeminiModelService::new(&config)),
            ModelProvider::OpenAi => Arc::new(OpenAiModelService::new(&config)),
        };
        log::info!("Using {} as generation provider", config.model_provider);

        let quiz_service =
            Arc::new(QuizService::new(model).with_max_attempts(config.max_generation_attempts));
        let view = Arc::new(TerminalView);
        let source: SharedAnswerSource = Arc::new(Mutex::new(StdinAnswerSource::new()));
        let session_service = Arc::new(SessionService::new(quiz_service, view, source));

        Ok(Self {
            session_service,
            config: Arc::new(config),
        })
    }
}
