//! Error types for the quiz engine.

use std::io;

use thiserror::Error;

/// Result type alias using GenerationError.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Signals raised while synthesizing a question.
///
/// All variants except `RetriesExhausted` are retry signals: the factory
/// discards the attempt and draws again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("expression cannot be evaluated")]
    InvalidExpression,

    #[error("result {value} exceeds magnitude limit {limit}")]
    OutOfRange { value: f64, limit: f64 },

    #[error("only {found} distinct options, need 4")]
    InsufficientOptions { found: usize },

    #[error("gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl GenerationError {
    /// Whether the factory should silently redraw.
    pub fn is_retry(&self) -> bool {
        !matches!(self, GenerationError::RetriesExhausted { .. })
    }
}

/// Errors from persisting the scoreboard.
#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("scoreboard I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("scoreboard JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player name is empty")]
    EmptyName,
}

/// Errors from loading or saving [`QuizConfig`](crate::quiz_engine::config::QuizConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("config JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
