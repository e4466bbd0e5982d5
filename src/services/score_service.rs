use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, PerformanceTier, SessionSummary};

/// Derives the final percentage and qualitative tier from the accumulated
/// answer records.
pub struct ScoreService;

impl ScoreService {
    pub fn summarize(records: &[AnswerRecord], total_count: usize) -> AppResult<SessionSummary> {
        if total_count == 0 {
            return Err(AppError::EmptySession);
        }

        let score = records.iter().filter(|record| record.is_correct).count();
        let percentage = 100.0 * score as f64 / total_count as f64;

        Ok(SessionSummary {
            score,
            total: total_count,
            percentage,
            tier: PerformanceTier::from_percentage(percentage),
            feedback: records.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::UserAnswer;
    use crate::test_utils::fixtures;

    fn records(outcomes: &[(char, bool)]) -> Vec<AnswerRecord> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, (correct, answered_right))| {
                let item = fixtures::quiz_item(*correct);
                let answer = if *answered_right {
                    UserAnswer::Choice(*correct)
                } else {
                    UserAnswer::Timeout
                };
                AnswerRecord::new(i + 1, answer, &item)
            })
            .collect()
    }

    #[test]
    fn half_right_is_needs_practice() {
        let records = records(&[('A', true), ('B', false), ('C', true), ('D', false)]);
        let summary = ScoreService::summarize(&records, 4).expect("summary should build");

        assert_eq!(summary.score, 2);
        assert_eq!(summary.percentage, 50.0);
        assert_eq!(summary.tier, PerformanceTier::NeedsPractice);
    }

    #[test]
    fn all_timeouts_recommend_review() {
        let records = records(&[('A', false), ('B', false), ('C', false)]);
        let summary = ScoreService::summarize(&records, 3).expect("summary should build");

        assert_eq!(summary.score, 0);
        assert_eq!(summary.tier, PerformanceTier::ReviewRecommended);
        assert!(summary
            .feedback
            .iter()
            .all(|record| record.user_answer == UserAnswer::Timeout));
    }

    #[test]
    fn perfect_score_is_excellent() {
        let records = records(&[('A', true), ('B', true)]);
        let summary = ScoreService::summarize(&records, 2).expect("summary should build");

        assert_eq!(summary.percentage, 100.0);
        assert_eq!(summary.tier, PerformanceTier::Excellent);
    }

    #[test]
    fn feedback_preserves_question_order() {
        let records = records(&[('A', true), ('B', false), ('C', true)]);
        let summary = ScoreService::summarize(&records, 3).expect("summary should build");

        let indexes: Vec<usize> = summary
            .feedback
            .iter()
            .map(|record| record.question_index)
            .collect();
        assert_eq!(indexes, vec![1, 2, 3]);
    }

    #[test]
    fn zero_total_is_rejected() {
        let err = ScoreService::summarize(&[], 0).expect_err("summary must refuse zero items");
        assert_eq!(err.error_code(), "EMPTY_SESSION");
    }
}
