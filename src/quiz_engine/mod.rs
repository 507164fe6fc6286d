//! Core quiz engine: question synthesis, sessions, and the scoreboard.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: tiers, expressions, questions, answer feedback |
//! | `synthesizer` | Draws and evaluates one expression per tier, with range checks |
//! | `distractors` | Plausible wrong answers near the correct value |
//! | `generator`   | Question factory, rejection-sampled batches of questions |
//! | `helpers`     | Rounding, option formatting, and option letters |
//! | `session`     | Session state machine: answering, advancing, Hard-tier timer |
//! | `scoreboard`  | Ranked top-10 board persisted as JSON |
//! | `config`      | Game settings file |
//! | `view`        | JSON snapshots of session and scoreboard for a UI client |
//! | `error`       | Error enums for generation, scoreboard, and config |

pub mod config;
pub mod distractors;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod scoreboard;
pub mod session;
pub mod synthesizer;
pub mod view;

// Re-export the public API surface so callers can use
// `quiz_engine::Session` without reaching into sub-modules.
pub use config::{QuestionCounts, QuizConfig};
pub use error::{ConfigError, GenerationError, ScoreboardError};
pub use generator::{build_batch, build_question, generate_quiz};
pub use models::{
    AnswerFeedback, AnswerValue, Difficulty, Expression, Operator, Question, QuizRequest,
    QuizResult, TierParams,
};
pub use scoreboard::{ScoreEntry, Scoreboard, ScoreboardStore, SCOREBOARD_CAPACITY};
pub use session::{Session, SessionState};
pub use view::{scoreboard_snapshot, session_snapshot};
