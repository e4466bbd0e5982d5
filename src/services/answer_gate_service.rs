use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::sleep;

use crate::console::{AnswerSource, SessionView};
use crate::errors::{AppError, AppResult};

/// Answer source shared across the questions of one session.
pub type SharedAnswerSource = Arc<Mutex<dyn AnswerSource>>;

/// Exactly one of these per gate invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Answer(char),
    Timeout,
}

/// Operator-interrupt channel, distinct from per-question expiry. Cloned
/// into every gate invocation; triggering it ends the whole session.
#[derive(Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

pub struct AbortHandle {
    tx: watch::Sender<bool>,
}

impl AbortHandle {
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl AbortSignal {
    pub fn pair() -> (AbortHandle, AbortSignal) {
        let (tx, rx) = watch::channel(false);
        (AbortHandle { tx }, AbortSignal { rx })
    }

    /// Resolves once the handle fires. Never resolves if the handle is
    /// dropped untriggered.
    pub async fn triggered(mut self) {
        if self.rx.wait_for(|aborted| *aborted).await.is_ok() {
            return;
        }
        std::future::pending::<()>().await
    }
}

/// Per-question race between a ticking countdown and validated operator
/// input. Two tasks coordinated by a close-once "expired" signal; the
/// first resolution wins and the loser is told to stop before the gate
/// returns.
pub struct AnswerGateService {
    view: Arc<dyn SessionView>,
}

impl AnswerGateService {
    pub fn new(view: Arc<dyn SessionView>) -> Self {
        Self { view }
    }

    pub async fn resolve(
        &self,
        source: SharedAnswerSource,
        valid_choices: &[char],
        duration: Duration,
        abort: AbortSignal,
    ) -> AppResult<GateOutcome> {
        let (expired_tx, expired_rx) = watch::channel(false);

        let mut clock = tokio::spawn(Self::run_clock(
            self.view.clone(),
            duration,
            expired_rx.clone(),
        ));
        let mut reader = tokio::spawn(Self::run_reader(
            self.view.clone(),
            source,
            valid_choices.to_vec(),
            expired_rx,
        ));

        tokio::select! {
            _ = abort.triggered() => {
                let _ = expired_tx.send(true);
                let _ = (&mut clock).await;
                let _ = (&mut reader).await;
                Err(AppError::Aborted)
            }
            clock_result = &mut clock => {
                // Deadline reached; stop the reader before reporting, so a
                // late keystroke is discarded rather than queued.
                let _ = expired_tx.send(true);
                let _ = (&mut reader).await;
                clock_result?;
                Ok(GateOutcome::Timeout)
            }
            reader_result = &mut reader => {
                // Answer arrived; silence the clock before reporting.
                let _ = expired_tx.send(true);
                let _ = (&mut clock).await;
                match reader_result? {
                    Some(choice) => Ok(GateOutcome::Answer(choice)),
                    None => Ok(GateOutcome::Timeout),
                }
            }
        }
    }

    /// Emits one advisory tick per remaining second, then completes at the
    /// deadline. Stops without side effects once `expired` fires.
    async fn run_clock(
        view: Arc<dyn SessionView>,
        duration: Duration,
        mut expired: watch::Receiver<bool>,
    ) {
        for remaining in (1..=duration.as_secs()).rev() {
            view.countdown_tick(remaining);
            tokio::select! {
                biased;
                _ = expired.wait_for(|flag| *flag) => return,
                _ = sleep(Duration::from_secs(1)) => {}
            }
        }
    }

    /// Prompts, reads and validates lines until a valid choice arrives.
    /// Invalid input is re-prompted without touching the clock. Completes
    /// with `None` only after `expired` fires.
    async fn run_reader(
        view: Arc<dyn SessionView>,
        source: SharedAnswerSource,
        valid_choices: Vec<char>,
        mut expired: watch::Receiver<bool>,
    ) -> Option<char> {
        loop {
            view.prompt_for_answer(&valid_choices);

            let line = tokio::select! {
                biased;
                _ = expired.wait_for(|flag| *flag) => return None,
                line = async { source.lock().await.next_line().await } => line,
            };

            match line {
                Some(text) => match Self::validate_choice(&text, &valid_choices) {
                    Some(choice) => return Some(choice),
                    None => view.invalid_choice(&valid_choices),
                },
                None => {
                    // Input channel closed; nothing more will ever arrive,
                    // so silence until the clock decides.
                    let _ = expired.wait_for(|flag| *flag).await;
                    return None;
                }
            }
        }
    }

    fn validate_choice(input: &str, valid_choices: &[char]) -> Option<char> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let first = chars.next()?.to_ascii_uppercase();
        if chars.next().is_none() && valid_choices.contains(&first) {
            Some(first)
        } else {
            None
        }
    }
}
