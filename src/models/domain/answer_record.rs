use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_item::QuizItem;

/// What the operator did with one question: picked a letter, or let the
/// clock run out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum UserAnswer {
    Choice(char),
    Timeout,
}

impl std::fmt::Display for UserAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserAnswer::Choice(letter) => write!(f, "{}", letter),
            UserAnswer::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

/// Outcome of one question, created after the answer gate resolves and
/// immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    /// 1-based position of the question in the session.
    pub question_index: usize,
    pub user_answer: UserAnswer,
    pub correct_answer: char,
    pub explanation: String,
    pub is_correct: bool,
}

impl AnswerRecord {
    pub fn new(question_index: usize, user_answer: UserAnswer, item: &QuizItem) -> Self {
        let is_correct = matches!(user_answer, UserAnswer::Choice(letter) if letter == item.correct);

        Self {
            question_index,
            user_answer,
            correct_answer: item.correct,
            explanation: item.explanation.clone(),
            is_correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn correct_choice_is_marked_correct() {
        let item = fixtures::quiz_item('B');
        let record = AnswerRecord::new(1, UserAnswer::Choice('B'), &item);

        assert!(record.is_correct);
        assert_eq!(record.correct_answer, 'B');
        assert_eq!(record.question_index, 1);
    }

    #[test]
    fn wrong_choice_is_marked_incorrect() {
        let item = fixtures::quiz_item('B');
        let record = AnswerRecord::new(2, UserAnswer::Choice('D'), &item);

        assert!(!record.is_correct);
        assert_eq!(record.user_answer, UserAnswer::Choice('D'));
    }

    #[test]
    fn timeout_is_never_correct() {
        let item = fixtures::quiz_item('A');
        let record = AnswerRecord::new(3, UserAnswer::Timeout, &item);

        assert!(!record.is_correct);
        assert_eq!(record.user_answer.to_string(), "TIMEOUT");
    }
}
