use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::answer_record::AnswerRecord;
use crate::models::domain::quiz_item::{FormatVariant, QuizItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Answer window for one question at this level.
    pub fn time_per_question(self) -> Duration {
        match self {
            Difficulty::Beginner => Duration::from_secs(30),
            Difficulty::Intermediate => Duration::from_secs(45),
            Difficulty::Advanced => Duration::from_secs(60),
        }
    }

    /// Beginner quizzes are conceptual; the higher levels ask for code
    /// snippets.
    pub fn format_variant(self) -> FormatVariant {
        match self {
            Difficulty::Beginner => FormatVariant::Plain,
            Difficulty::Intermediate => FormatVariant::CodeOptional,
            Difficulty::Advanced => FormatVariant::CodeRequired,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// Qualitative label for a finished session, highest matching threshold
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    NeedsPractice,
    ReviewRecommended,
}

impl PerformanceTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceTier::Excellent
        } else if percentage >= 70.0 {
            PerformanceTier::Good
        } else if percentage >= 50.0 {
            PerformanceTier::NeedsPractice
        } else {
            PerformanceTier::ReviewRecommended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::NeedsPractice => "needs practice",
            PerformanceTier::ReviewRecommended => "review recommended",
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Final report handed back to the caller and to the display channel.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub tier: PerformanceTier,
    /// Ordered pass-through of the per-question records.
    pub feedback: Vec<AnswerRecord>,
}

/// Transient aggregate for one quiz run, owned by the session service and
/// discarded after the summary is produced or on abort.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub items: Vec<QuizItem>,
    pub records: Vec<AnswerRecord>,
    pub score: usize,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(topic: &str, difficulty: Difficulty, items: Vec<QuizItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            difficulty,
            items,
            records: Vec::new(),
            score: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn time_per_question(&self) -> Duration {
        self.difficulty.time_per_question()
    }

    /// Append one resolved question and keep the running score current.
    pub fn record_answer(&mut self, record: AnswerRecord) {
        if record.is_correct {
            self.score += 1;
        }
        self.records.push(record);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}
