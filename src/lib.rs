//! # math_hunter
//!
//! The engine behind a timed multiple-choice arithmetic quiz.
//!
//! The library generates arithmetic questions for three difficulty tiers,
//! runs a quiz session over a batch of them, and keeps a persisted top-10
//! scoreboard. Rendering, sound, and input handling belong to the front end;
//! it drives the engine through [`Session`] and [`ScoreboardStore`] and can
//! poll JSON snapshots of both.
//!
//! ## How it works
//!
//! 1. [`Session::start`] builds a batch for a [`Difficulty`]. Each question is
//!    rejection-sampled: an expression is drawn and evaluated, oversized
//!    results are discarded, and three distinct wrong options are drawn near
//!    the answer. Any failed draw simply starts over.
//! 2. The front end shows [`Session::current_question`], passes the chosen
//!    option text to [`Session::submit_answer`], shows the returned
//!    [`AnswerFeedback`], then calls [`Session::advance`].
//! 3. On Hard, each question has 15 seconds. The front end polls
//!    [`Session::remaining_time`] and calls [`Session::expire_current`] when
//!    it hits zero. A wrong or expired Hard answer restarts the whole run.
//! 4. When the session is complete, [`ScoreboardStore::qualifies`] decides
//!    whether to ask for a name, and [`ScoreboardStore::record`] saves it.
//!
//! ## Quick start
//!
//! ```rust
//! use math_hunter::{Difficulty, Session};
//!
//! let mut session = Session::with_seed(42);
//! session.start(5, Difficulty::Easy).unwrap();
//!
//! while let Some(question) = session.current_question() {
//!     println!("{}", question.prompt());
//!     let answer = question.correct_text();
//!     let feedback = session.submit_answer(&answer).unwrap().unwrap();
//!     assert!(feedback.correct);
//!     session.advance();
//! }
//!
//! let result = session.result().unwrap();
//! assert_eq!((result.score, result.total), (5, 5));
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `math_hunter::Session`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    build_batch, generate_quiz, scoreboard_snapshot, session_snapshot, AnswerFeedback,
    AnswerValue, ConfigError, Difficulty, GenerationError, Question, QuizConfig, QuizRequest,
    QuizResult, ScoreEntry, Scoreboard, ScoreboardError, ScoreboardStore, Session, SessionState,
};

#[cfg(test)]
mod tests;
