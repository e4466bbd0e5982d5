use std::sync::Arc;

use validator::Validate;

use crate::console::SessionView;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, Difficulty, Session, SessionSummary, UserAnswer, CHOICE_LETTERS};
use crate::models::dto::SessionRequestDto;
use crate::services::answer_gate_service::{
    AbortSignal, AnswerGateService, GateOutcome, SharedAnswerSource,
};
use crate::services::quiz_service::QuizService;
use crate::services::score_service::ScoreService;

/// Sequences quiz items through the answer gate, one at a time, and turns
/// the outcomes into a session summary.
pub struct SessionService {
    quiz: Arc<QuizService>,
    gate: AnswerGateService,
    view: Arc<dyn SessionView>,
    source: SharedAnswerSource,
}

impl SessionService {
    pub fn new(
        quiz: Arc<QuizService>,
        view: Arc<dyn SessionView>,
        source: SharedAnswerSource,
    ) -> Self {
        Self {
            quiz,
            gate: AnswerGateService::new(view.clone()),
            view,
            source,
        }
    }

    /// Run one full quiz session. An abort from the gate ends the session
    /// immediately with no summary; the accumulated records go down with
    /// the session aggregate.
    pub async fn run(
        &self,
        request: SessionRequestDto,
        abort: AbortSignal,
    ) -> AppResult<SessionSummary> {
        request.validate()?;
        let difficulty = Difficulty::parse(&request.level).ok_or_else(|| {
            AppError::ValidationError(format!("unknown difficulty level '{}'", request.level))
        })?;
        let target_count = usize::try_from(request.count).map_err(|_| {
            AppError::ValidationError(format!("invalid question count {}", request.count))
        })?;

        self.view.session_starting(&request.topic, difficulty);

        let items = self
            .quiz
            .generate(&request.topic, difficulty, target_count)
            .await?;
        if items.is_empty() {
            return Err(AppError::NoQuestions);
        }

        let mut session = Session::new(&request.topic, difficulty, items);
        let duration = session.time_per_question();
        let total = session.items.len();
        log::info!(
            "Starting session {} with {} questions at {} level",
            session.id,
            total,
            difficulty
        );

        for index in 0..total {
            let item = session.items[index].clone();
            self.view.show_question(index + 1, total, &item);

            let outcome = self
                .gate
                .resolve(
                    self.source.clone(),
                    &CHOICE_LETTERS,
                    duration,
                    abort.clone(),
                )
                .await?;

            let user_answer = match outcome {
                GateOutcome::Answer(letter) => UserAnswer::Choice(letter),
                GateOutcome::Timeout => {
                    self.view.time_expired();
                    UserAnswer::Timeout
                }
            };
            session.record_answer(AnswerRecord::new(index + 1, user_answer, &item));
        }

        session.finish();
        let summary = ScoreService::summarize(&session.records, total)?;
        self.view.show_summary(&session.topic, &summary);
        log::info!(
            "Session {} finished with score {}/{}",
            session.id,
            summary.score,
            summary.total
        );

        Ok(summary)
    }
}
