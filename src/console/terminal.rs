use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::console::{AnswerSource, SessionView};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, PerformanceTier, QuizItem, SessionSummary, UserAnswer};
use crate::models::dto::SessionRequestDto;

/// Plain-text terminal renderer for session output.
pub struct TerminalView;

impl TerminalView {
    fn flush() {
        let _ = std::io::stdout().flush();
    }

    fn choices_label(valid_choices: &[char]) -> String {
        valid_choices
            .iter()
            .map(|letter| letter.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl SessionView for TerminalView {
    fn session_starting(&self, topic: &str, difficulty: Difficulty) {
        println!("\nGenerating a {} level quiz on {}...\n", difficulty, topic);
    }

    fn show_question(&self, index: usize, total: usize, item: &QuizItem) {
        println!("\nQuestion {}/{}:", index, total);
        println!("{}", item.question);
        if let Some(code) = &item.code {
            println!("{}", code);
        }
        for (letter, text) in &item.options {
            println!("{}) {}", letter, text);
        }
    }

    fn countdown_tick(&self, remaining_secs: u64) {
        print!("\rTime remaining: {} seconds ", remaining_secs);
        Self::flush();
    }

    fn prompt_for_answer(&self, valid_choices: &[char]) {
        print!("\nYour answer ({}): ", Self::choices_label(valid_choices));
        Self::flush();
    }

    fn invalid_choice(&self, valid_choices: &[char]) {
        println!(
            "Invalid choice. Please enter {}.",
            Self::choices_label(valid_choices)
        );
    }

    fn time_expired(&self) {
        println!("\nTime's up! Moving to the next question...");
    }

    fn show_summary(&self, topic: &str, summary: &SessionSummary) {
        println!("\n=== Quiz Results ===");
        println!("Score: {}/{}", summary.score, summary.total);

        println!("\n=== Detailed Feedback ===");
        for record in &summary.feedback {
            println!("\nQuestion {}:", record.question_index);
            match record.user_answer {
                UserAnswer::Timeout => println!("Time expired!"),
                UserAnswer::Choice(letter) => println!("Your answer: {}", letter),
            }
            println!("Correct answer: {}", record.correct_answer);
            println!("Explanation: {}", record.explanation);
        }

        println!("\n=== Performance Analysis ===");
        println!("Result: {:.1}% ({})", summary.percentage, summary.tier);
        let message = match summary.tier {
            PerformanceTier::Excellent => {
                format!("Excellent! You have a strong grasp of {}!", topic)
            }
            PerformanceTier::Good => "Good job! Keep improving!".to_string(),
            PerformanceTier::NeedsPractice => format!(
                "You're on the right track, but need more practice in {}.",
                topic
            ),
            PerformanceTier::ReviewRecommended => {
                format!("You might want to review {} concepts and try again.", topic)
            }
        };
        println!("{}", message);
    }
}

/// Buffered async stdin as an answer source.
///
/// Cancelling a pending read does not interrupt the underlying terminal
/// read; a line typed in that window is consumed with it. Accepted
/// limitation of reading a real terminal.
pub struct StdinAnswerSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinAnswerSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinAnswerSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerSource for StdinAnswerSource {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.next_line().await.ok().flatten()
    }
}

fn read_value(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    TerminalView::flush();

    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| AppError::InternalError(format!("failed to read operator input: {}", e)))?;
    Ok(buffer.trim().to_string())
}

/// Collect the three startup values from the operator. Re-prompts until the
/// question count is numeric; the session service re-validates everything
/// else.
pub fn prompt_session_request() -> AppResult<SessionRequestDto> {
    let level = read_value("Enter difficulty level (beginner/intermediate/advanced): ")?;
    let topic = read_value("Enter quiz topic: ")?;

    let count = loop {
        let raw = read_value("Enter number of questions: ")?;
        match raw.parse::<i64>() {
            Ok(value) => break value,
            Err(_) => println!("Please enter a whole number."),
        }
    };

    Ok(SessionRequestDto {
        topic,
        level,
        count,
    })
}
