//! The session engine: one run through a batch of questions.
//!
//! ```text
//! NotStarted ──start──▶ InProgress ──advance (last)──▶ Complete
//!                        │    ▲
//!                        │    └── wrong / expired answer on Hard: restart
//!                        └──────▶ Failed (Hard restart could not regenerate)
//! ```
//!
//! Answering and advancing are separate calls so the caller can show
//! feedback in between. Time is never tracked by a background timer: the
//! session only remembers when the current question was shown, and
//! [`Session::remaining_time_at`] computes what is left on demand.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    config::QuizConfig,
    error::Result,
    generator::{build_batch, make_rng, DEFAULT_MAX_ATTEMPTS},
    models::{AnswerFeedback, Difficulty, Question, QuizResult, HARD_TIME_LIMIT_SECS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
    /// A Hard run was lost and no fresh batch could be built. Nothing can be
    /// answered until [`Session::restart`] or [`Session::start`] succeeds.
    Failed,
}

pub struct Session {
    rng: StdRng,
    max_attempts: u32,
    time_limit: Duration,
    state: SessionState,
    difficulty: Difficulty,
    questions: Vec<Question>,
    cursor: usize,
    score: u32,
    answered: bool,
    question_started: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    /// A session drawing from entropy with default limits.
    pub fn new() -> Self {
        Session::build(None, DEFAULT_MAX_ATTEMPTS, Duration::from_secs(HARD_TIME_LIMIT_SECS))
    }

    /// Reproducible session: the same seed yields the same batches.
    pub fn with_seed(seed: u64) -> Self {
        Session::build(Some(seed), DEFAULT_MAX_ATTEMPTS, Duration::from_secs(HARD_TIME_LIMIT_SECS))
    }

    pub fn from_config(config: &QuizConfig, seed: Option<u64>) -> Self {
        Session::build(seed, config.max_generation_attempts, config.hard_time_limit())
    }

    fn build(seed: Option<u64>, max_attempts: u32, time_limit: Duration) -> Self {
        Session {
            rng: make_rng(seed),
            max_attempts,
            time_limit,
            state: SessionState::NotStarted,
            difficulty: Difficulty::Easy,
            questions: Vec::new(),
            cursor: 0,
            score: 0,
            answered: false,
            question_started: Instant::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Generate a fresh batch and begin at the first question.
    ///
    /// On failure the previous state is left untouched.
    pub fn start(&mut self, count: usize, difficulty: Difficulty) -> Result<()> {
        let questions = build_batch(&mut self.rng, count, difficulty, self.max_attempts)?;
        self.difficulty = difficulty;
        self.questions = questions;
        self.cursor = 0;
        self.score = 0;
        self.answered = false;
        self.question_started = Instant::now();
        self.state = if self.questions.is_empty() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        };
        info!("started {difficulty} session with {count} questions");
        Ok(())
    }

    /// Start over at the same tier and length with a new batch.
    /// Does nothing before the first [`Session::start`]. A failed regeneration
    /// leaves the state as it was.
    pub fn restart(&mut self) -> Result<()> {
        if self.state == SessionState::NotStarted {
            return Ok(());
        }
        self.start(self.questions.len(), self.difficulty)
    }

    /// Move past the current question, answered or not.
    pub fn advance(&mut self) {
        if self.state != SessionState::InProgress {
            return;
        }
        self.cursor += 1;
        self.answered = false;
        self.question_started = Instant::now();
        if self.cursor >= self.questions.len() {
            self.state = SessionState::Complete;
            info!(
                "{} session complete: {}/{}",
                self.difficulty,
                self.score,
                self.questions.len()
            );
        }
    }

    // -----------------------------------------------------------------------
    // Answering
    // -----------------------------------------------------------------------

    /// Judge the selected option text against the current question.
    ///
    /// Malformed text is just a wrong answer. Returns `None` when there is no
    /// question to answer or it was already answered. A wrong answer on a
    /// tier that restarts on failure regenerates the batch before returning;
    /// only that regeneration can fail.
    pub fn submit_answer(&mut self, selected: &str) -> Result<Option<AnswerFeedback>> {
        let correct = match self.open_question() {
            Some(q) => q.is_correct(selected),
            None => return Ok(None),
        };
        self.resolve(correct).map(Some)
    }

    /// Time ran out: count the current question as wrong with no input.
    pub fn expire_current(&mut self) -> Result<Option<AnswerFeedback>> {
        if self.open_question().is_none() {
            return Ok(None);
        }
        debug!("question {} expired", self.position());
        self.resolve(false).map(Some)
    }

    fn open_question(&self) -> Option<&Question> {
        if self.answered {
            return None;
        }
        self.current_question()
    }

    fn resolve(&mut self, correct: bool) -> Result<AnswerFeedback> {
        let (correct_text, correct_index) = match self.current_question() {
            Some(q) => (q.correct_text(), q.correct_index()),
            None => (String::new(), 0),
        };
        self.answered = true;
        if correct {
            self.score += 1;
        }

        let restarted = !correct && self.difficulty.restarts_on_failure();
        if restarted {
            info!("{} run failed at question {}, restarting", self.difficulty, self.position());
            if let Err(e) = self.restart() {
                warn!("{} run could not be regenerated: {e}", self.difficulty);
                self.state = SessionState::Failed;
                self.score = 0;
                return Err(e);
            }
        }

        Ok(AnswerFeedback { correct, correct_text, correct_index, restarted })
    }

    // -----------------------------------------------------------------------
    // Timing
    // -----------------------------------------------------------------------

    /// Time left on the current question, or `None` for untimed tiers.
    pub fn remaining_time(&self) -> Option<Duration> {
        self.remaining_time_at(Instant::now())
    }

    /// [`Session::remaining_time`] evaluated at `now`.
    pub fn remaining_time_at(&self, now: Instant) -> Option<Duration> {
        if self.state != SessionState::InProgress {
            return None;
        }
        if self.difficulty.time_limit().is_none() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.question_started);
        Some(self.time_limit.saturating_sub(elapsed))
    }

    /// True once a timed question has no time left and is still open.
    pub fn is_time_up_at(&self, now: Instant) -> bool {
        !self.answered && self.remaining_time_at(now) == Some(Duration::ZERO)
    }

    pub fn question_started(&self) -> Instant {
        self.question_started
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Zero-based index of the current question.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One-based question number, capped at the batch length.
    pub fn position(&self) -> usize {
        (self.cursor + 1).min(self.questions.len())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// `"Q: 3/30"`.
    pub fn progress_label(&self) -> String {
        format!("Q: {}/{}", self.position(), self.question_count())
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.state != SessionState::InProgress {
            return None;
        }
        self.questions.get(self.cursor)
    }

    /// Final tally, once the session is complete.
    pub fn result(&self) -> Option<QuizResult> {
        self.is_complete().then(|| QuizResult {
            score: self.score,
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
            difficulty: self.difficulty,
        })
    }
}
