pub mod answer_record;
pub mod quiz_item;
pub mod session;
pub use answer_record::{AnswerRecord, UserAnswer};
pub use quiz_item::{FormatVariant, QuizItem, CHOICE_LETTERS};
pub use session::{Difficulty, PerformanceTier, Session, SessionSummary};
