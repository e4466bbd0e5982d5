use async_trait::async_trait;

use crate::models::domain::{Difficulty, QuizItem, SessionSummary};

pub mod terminal;
pub use terminal::{StdinAnswerSource, TerminalView};

/// Display output channel for a running session. Content only; styling is
/// the implementation's business.
pub trait SessionView: Send + Sync {
    fn session_starting(&self, topic: &str, difficulty: Difficulty);
    fn show_question(&self, index: usize, total: usize, item: &QuizItem);
    /// Advisory countdown tick, once per remaining second.
    fn countdown_tick(&self, remaining_secs: u64);
    fn prompt_for_answer(&self, valid_choices: &[char]);
    fn invalid_choice(&self, valid_choices: &[char]);
    fn time_expired(&self);
    fn show_summary(&self, topic: &str, summary: &SessionSummary);
}

/// Operator input channel: one raw line per call.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Next line from the operator, or `None` once the channel is closed.
    /// A closed channel means silence, not an error.
    async fn next_line(&mut self) -> Option<String>;
}
