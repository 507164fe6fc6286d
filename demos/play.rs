//! Play the quiz in a terminal.
//!
//! Run with: `cargo run --example play`
//!
//! A minimal front end over the engine:
//!
//! 1. Pick a tier (`easy`, `medium`, `hard`).
//! 2. Answer each question by letter (`a`-`d`). On Hard the 15 second limit
//!    is checked when you press enter; a late or wrong answer restarts the run.
//! 3. If the score makes the top 10, enter a name for the scoreboard.
//!
//! Settings are read from `math_hunter.json` when present. Set `RUST_LOG=debug`
//! to watch the generator discard draws.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use log::info;
use math_hunter::quiz_engine::helpers::{letter_index, option_label};
use math_hunter::{Difficulty, QuizConfig, ScoreboardStore, Session};

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Option<String> {
    print!("{text}");
    io::stdout().flush().ok()?;
    lines.next()?.ok().map(|l| l.trim().to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = QuizConfig::load("math_hunter.json")?;
    let mut store = ScoreboardStore::load(&config.scoreboard_path);
    info!("scoreboard has {} entries", store.scoreboard().len());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let difficulty = loop {
        let Some(choice) = prompt(&mut lines, "Difficulty (easy/medium/hard): ") else {
            return Ok(());
        };
        match choice.parse::<Difficulty>() {
            Ok(d) => break d,
            Err(e) => println!("{e}"),
        }
    };

    let mut session = Session::from_config(&config, None);
    session.start(config.question_count(difficulty), difficulty)?;

    while let Some(question) = session.current_question() {
        println!();
        println!("{}   Score: {}", session.progress_label(), session.score());
        if let Some(left) = session.remaining_time() {
            println!("Time: {}s", left.as_secs());
        }
        println!("{}", question.prompt());
        for (i, option) in question.options().iter().enumerate() {
            println!("  {}", option_label(i, option));
        }
        let options = question.options().clone();

        let Some(input) = prompt(&mut lines, "> ") else {
            return Ok(());
        };

        let feedback = if session.is_time_up_at(Instant::now()) {
            println!("TIME'S UP!");
            session.expire_current()?
        } else {
            let selected = input
                .chars()
                .next()
                .and_then(letter_index)
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or(input);
            session.submit_answer(&selected)?
        };

        let Some(feedback) = feedback else { continue };
        if feedback.correct {
            println!("CORRECT!");
        } else {
            println!("WRONG! The answer was {}", option_label(feedback.correct_index, &feedback.correct_text));
        }
        if feedback.restarted {
            println!("Hard mode: starting over with new questions.");
            continue;
        }
        session.advance();
    }

    let Some(result) = session.result() else {
        return Ok(());
    };
    println!();
    println!("Final score: {}/{} ({})", result.score, result.total, result.difficulty);

    if store.qualifies(result.score) {
        loop {
            let Some(name) = prompt(&mut lines, "Top 10! Enter your name: ") else {
                break;
            };
            match store.record_result(&name, result) {
                Ok(_) => break,
                Err(e) => println!("{e}"),
            }
        }
    }

    println!();
    println!("SCOREBOARD");
    for (rank, entry) in store.scoreboard().entries().iter().enumerate() {
        println!("{:>2}. {}", rank + 1, entry.headline());
        println!("    {}", entry.details());
    }
    Ok(())
}
