//! JSON snapshots for a UI client.
//!
//! The front end polls these instead of reaching into the engine. Field
//! names follow the quiz screen: a score badge, a `Q: n/N` counter, a timer
//! label, the prompt, and four lettered option buttons.

use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::quiz_engine::{
    helpers::option_label,
    scoreboard::Scoreboard,
    session::Session,
};

/// Remaining time at or below which the timer turns red.
pub const TIMER_WARNING: Duration = Duration::from_secs(5);

/// `"Time: 12s"` for timed questions, empty otherwise.
fn timer_text(remaining: Option<Duration>) -> String {
    match remaining {
        Some(left) => format!("Time: {}s", left.as_secs()),
        None => String::new(),
    }
}

fn option_buttons(session: &Session) -> Value {
    let Some(question) = session.current_question() else {
        return Value::Array(Vec::new());
    };
    let correct = question.correct_index();
    let buttons = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "index": i,
                "label": option_label(i, text),
                "value": text,
                // Only revealed once the question has been answered.
                "is_correct": session.is_answered().then_some(i == correct),
            })
        })
        .collect();
    Value::Array(buttons)
}

/// Everything the quiz screen needs to render the session at `now`.
pub fn session_snapshot(session: &Session, now: Instant) -> Value {
    let remaining = session.remaining_time_at(now);
    let question = session.current_question();
    json!({
        "state": session.state(),
        "difficulty": session.difficulty(),
        "score": session.score(),
        "score_label": format!("Score: {}", session.score()),
        "progress_label": session.progress_label(),
        "question": question.map(|q| q.prompt()),
        "options": option_buttons(session),
        "answered": session.is_answered(),
        "timer": timer_text(remaining),
        "timer_warning": remaining.is_some_and(|left| left <= TIMER_WARNING),
        "time_up": session.is_time_up_at(now),
        "result": session.result(),
    })
}

/// Scoreboard rows, numbered from 1.
pub fn scoreboard_snapshot(board: &Scoreboard) -> Value {
    let rows = board
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| {
            json!({
                "rank": i + 1,
                "headline": e.headline(),
                "details": e.details(),
            })
        })
        .collect();
    Value::Array(rows)
}
