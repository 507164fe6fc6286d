//! Game settings, stored as JSON next to the scoreboard.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::ConfigError,
    generator::DEFAULT_MAX_ATTEMPTS,
    models::{Difficulty, QuizRequest, HARD_TIME_LIMIT_SECS},
};

/// Batch length per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Default for QuestionCounts {
    fn default() -> Self {
        Self {
            easy: Difficulty::Easy.default_question_count(),
            medium: Difficulty::Medium.default_question_count(),
            hard: Difficulty::Hard.default_question_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub scoreboard_path: PathBuf,
    pub hard_time_limit_secs: u64,
    pub max_generation_attempts: u32,
    pub question_counts: QuestionCounts,
    /// Sound effects preference; playback lives in the front end.
    pub sound_on: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            scoreboard_path: PathBuf::from("scoreboard.json"),
            hard_time_limit_secs: HARD_TIME_LIMIT_SECS,
            max_generation_attempts: DEFAULT_MAX_ATTEMPTS,
            question_counts: QuestionCounts::default(),
            sound_on: true,
        }
    }
}

impl QuizConfig {
    /// Read settings from `path`. A missing file means defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: QuizConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hard_time_limit_secs == 0 {
            return Err(ConfigError::Invalid("hard_time_limit_secs must be positive".into()));
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::Invalid("max_generation_attempts must be positive".into()));
        }
        for difficulty in Difficulty::ALL {
            if self.question_count(difficulty) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "question count for {difficulty} must be positive"
                )));
            }
        }
        Ok(())
    }

    pub fn question_count(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy   => self.question_counts.easy,
            Difficulty::Medium => self.question_counts.medium,
            Difficulty::Hard   => self.question_counts.hard,
        }
    }

    pub fn hard_time_limit(&self) -> Duration {
        Duration::from_secs(self.hard_time_limit_secs)
    }

    /// The request the menu issues for `difficulty`.
    pub fn request(&self, difficulty: Difficulty, rng_seed: Option<u64>) -> QuizRequest {
        QuizRequest {
            difficulty,
            question_count: self.question_count(difficulty),
            rng_seed,
        }
    }
}
