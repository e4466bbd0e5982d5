use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    #[error("Insufficient yield: {0}")]
    InsufficientYield(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No questions were produced for this session")]
    NoQuestions,

    #[error("Cannot summarise a session with zero questions")]
    EmptySession,

    #[error("Session aborted by operator")]
    Aborted,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::GenerationFailure(_) => "GENERATION_FAILURE",
            AppError::InsufficientYield(_) => "INSUFFICIENT_YIELD",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NoQuestions => "NO_QUESTIONS",
            AppError::EmptySession => "EMPTY_SESSION",
            AppError::Aborted => "ABORTED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GenerationFailure(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::GenerationFailure("empty".into()).error_code(),
            "GENERATION_FAILURE"
        );
        assert_eq!(
            AppError::InsufficientYield("2 of 5".into()).error_code(),
            "INSUFFICIENT_YIELD"
        );
        assert_eq!(AppError::Aborted.error_code(), "ABORTED");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::ValidationError("unknown difficulty level 'expert'".into());
        assert_eq!(
            err.to_string(),
            "Validation error: unknown difficulty level 'expert'"
        );
        assert_eq!(
            AppError::EmptySession.to_string(),
            "Cannot summarise a session with zero questions"
        );
    }
}
