//! Top-10 scoreboard and its JSON file.
//!
//! The file is a plain JSON array of entries, pretty-printed and rewritten
//! whole on every successful insertion. A missing or unreadable file is
//! treated as an empty board.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::ScoreboardError,
    models::{Difficulty, QuizResult},
};

/// Entries kept on the board.
pub const SCOREBOARD_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// `DD.MM.YYYY`
    pub date: String,
    /// 12-hour clock, lower case (`03:07pm`).
    pub time: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total: u32,
}

impl ScoreEntry {
    pub fn new(
        name: impl Into<String>,
        score: u32,
        total: u32,
        difficulty: Difficulty,
        at: NaiveDateTime,
    ) -> Self {
        ScoreEntry {
            name: name.into(),
            date: at.format("%d.%m.%Y").to_string(),
            time: at.format("%I:%M%p").to_string().to_lowercase(),
            difficulty,
            score,
            total,
        }
    }

    /// Entry stamped with the local wall clock.
    pub fn now(name: impl Into<String>, score: u32, total: u32, difficulty: Difficulty) -> Self {
        Self::new(name, score, total, difficulty, Local::now().naive_local())
    }

    /// `"Ann - 27/30"`
    pub fn headline(&self) -> String {
        format!("{} - {}/{}", self.name, self.score, self.total)
    }

    /// `"Easy | 01.02.2025 03:07pm"`
    pub fn details(&self) -> String {
        format!("{} | {} {}", self.difficulty, self.date, self.time)
    }
}

/// Ranked entries, best first. Never longer than [`SCOREBOARD_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank arbitrary entries, keeping the best ten.
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut board = Scoreboard { entries };
        board.rank();
        board
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= SCOREBOARD_CAPACITY
    }

    /// Whether `score` earns a place. Matching the last place is not enough;
    /// `total` plays no part here.
    pub fn qualifies(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(last) if self.is_full() => score > last.score,
            _ => true,
        }
    }

    /// Add an entry, re-rank, and drop whatever falls off the bottom.
    pub fn insert(&mut self, entry: ScoreEntry) {
        self.entries.push(entry);
        self.rank();
    }

    /// Descending by `(score, total)`. The sort is stable, so earlier
    /// entries win exact ties.
    fn rank(&mut self) {
        self.entries
            .sort_by(|a, b| (b.score, b.total).cmp(&(a.score, a.total)));
        self.entries.truncate(SCOREBOARD_CAPACITY);
    }
}

/// A scoreboard bound to its file.
#[derive(Debug, Clone)]
pub struct ScoreboardStore {
    path: PathBuf,
    board: Scoreboard,
}

impl ScoreboardStore {
    /// Read the board at `path`. Never fails: a missing file is an empty
    /// board, and a corrupt one is logged and treated the same way.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let board = read_board(&path);
        ScoreboardStore { path, board }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.board
    }

    pub fn qualifies(&self, score: u32) -> bool {
        self.board.qualifies(score)
    }

    /// Stamp and record a finished run under `name`.
    pub fn record(
        &mut self,
        name: &str,
        score: u32,
        total: u32,
        difficulty: Difficulty,
    ) -> Result<&Scoreboard, ScoreboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreboardError::EmptyName);
        }
        self.record_entry(ScoreEntry::now(name, score, total, difficulty))
    }

    pub fn record_result(&mut self, name: &str, result: QuizResult) -> Result<&Scoreboard, ScoreboardError> {
        self.record(name, result.score, result.total, result.difficulty)
    }

    /// Insert a prepared entry and rewrite the file. The in-memory board only
    /// changes once the write succeeded.
    pub fn record_entry(&mut self, entry: ScoreEntry) -> Result<&Scoreboard, ScoreboardError> {
        if entry.name.trim().is_empty() {
            return Err(ScoreboardError::EmptyName);
        }
        let mut next = self.board.clone();
        next.insert(entry);
        write_board(&self.path, &next)?;
        info!("scoreboard saved with {} entries", next.len());
        self.board = next;
        Ok(&self.board)
    }
}

fn read_board(path: &Path) -> Scoreboard {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Scoreboard::new(),
        Err(e) => {
            warn!("cannot read scoreboard {}: {e}", path.display());
            return Scoreboard::new();
        }
    };
    match serde_json::from_str::<Vec<ScoreEntry>>(&raw) {
        Ok(entries) => Scoreboard::from_entries(entries),
        Err(e) => {
            warn!("ignoring corrupt scoreboard {}: {e}", path.display());
            Scoreboard::new()
        }
    }
}

fn write_board(path: &Path, board: &Scoreboard) -> Result<(), ScoreboardError> {
    let json = serde_json::to_string_pretty(board)?;
    fs::write(path, json)?;
    Ok(())
}
