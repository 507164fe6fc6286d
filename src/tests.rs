//! Behavioural tests for the `math_hunter` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical batch; different seeds → different batches |
//! | Option invariants | Four distinct options; the correct text appears exactly once |
//! | Answer checking | Tolerance for fractions, exact match for integers |
//! | Magnitude | Results stay within 5000 (999 for fractions) |
//! | Tiers | Operator sets and kinds per tier |
//! | Session flows | Completion, Hard restart, expiry |
//! | Scoreboard | Top-10 truncation, qualification, load after record |

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use crate::quiz_engine::{
    build_batch, generate_quiz, generator::make_rng, AnswerValue, Difficulty, Question,
    QuizRequest, ScoreEntry, Scoreboard, ScoreboardStore, Session, SessionState,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn batch(difficulty: Difficulty, count: usize, seed: u64) -> Vec<Question> {
    generate_quiz(&QuizRequest { difficulty, question_count: count, rng_seed: Some(seed) })
        .expect("tier parameters always converge")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("math_hunter_it_{name}_{}.json", std::process::id()))
}

fn wrong_option(q: &Question) -> String {
    let correct = q.correct_text();
    q.options()
        .iter()
        .find(|o| **o != correct)
        .cloned()
        .expect("four distinct options")
}

const SEEDS: [u64; 4] = [1, 42, 999, 0xDEAD_BEEF];

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_batch() {
    for difficulty in Difficulty::ALL {
        assert_eq!(batch(difficulty, 20, 12345), batch(difficulty, 20, 12345));
    }
}

#[test]
fn different_seeds_produce_varied_batches() {
    let a = batch(Difficulty::Medium, 20, 1);
    let b = batch(Difficulty::Medium, 20, 2);
    let same = a.iter().zip(&b).filter(|(x, y)| x.prompt() == y.prompt()).count();
    assert!(same < 5, "{same}/20 identical prompts across seeds");
}

// ── option invariants ────────────────────────────────────────────────────────

#[test]
fn correct_text_appears_exactly_once_among_distinct_options() {
    for difficulty in Difficulty::ALL {
        for seed in SEEDS {
            for q in batch(difficulty, 100, seed) {
                let correct = q.correct_text();
                let hits = q.options().iter().filter(|o| **o == correct).count();
                assert_eq!(hits, 1, "{} options {:?}", q.prompt(), q.options());
                let distinct: HashSet<&String> = q.options().iter().collect();
                assert_eq!(distinct.len(), 4, "{} options {:?}", q.prompt(), q.options());
                assert_eq!(q.options()[q.correct_index()], correct);
            }
        }
    }
}

#[test]
fn options_are_formatted_by_kind() {
    for q in batch(Difficulty::Hard, 200, 7) {
        for option in q.options() {
            if q.is_fractional() {
                let decimals = option.split('.').nth(1).map(str::len);
                assert_eq!(decimals, Some(2), "{option} in {}", q.prompt());
            } else {
                assert!(option.parse::<i64>().is_ok(), "{option} in {}", q.prompt());
            }
        }
    }
}

#[test]
fn prompt_renders_the_expression() {
    for q in batch(Difficulty::Hard, 50, 3) {
        assert_eq!(q.prompt(), format!("What is {}?", q.expression()));
    }
}

// ── answer checking ──────────────────────────────────────────────────────────

#[test]
fn fractional_answers_accept_within_tolerance_only() {
    let fractional: Vec<Question> = batch(Difficulty::Hard, 300, 21)
        .into_iter()
        .filter(Question::is_fractional)
        .collect();
    assert!(!fractional.is_empty(), "Hard batches include real division");
    for q in fractional {
        let x = q.answer().as_f64();
        assert!(q.is_correct(&q.correct_text()));
        assert!(q.is_correct(&format!("{}", x + 0.0004)));
        assert!(!q.is_correct(&format!("{}", x + 0.002)));
        assert!(!q.is_correct(&wrong_option(&q)));
    }
}

#[test]
fn integral_answers_need_exact_equality() {
    for q in batch(Difficulty::Medium, 100, 22) {
        let AnswerValue::Integer(n) = q.answer() else {
            panic!("Medium produced a fractional answer: {}", q.prompt());
        };
        assert!(q.is_correct(&n.to_string()));
        assert!(!q.is_correct(&(n + 1).to_string()));
        assert!(!q.is_correct(&format!("{n}.0")));
    }
}

// ── magnitude and tiers ──────────────────────────────────────────────────────

#[test]
fn results_stay_within_magnitude_limits() {
    for difficulty in Difficulty::ALL {
        for q in batch(difficulty, 200, 31) {
            let v = q.answer().as_f64().abs();
            assert!(v <= 5000.0, "{} = {v}", q.prompt());
            if q.is_fractional() {
                assert!(v <= 999.0, "{} = {v}", q.prompt());
            }
        }
    }
}

#[test]
fn only_hard_uses_real_division() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        for q in batch(difficulty, 200, 41) {
            assert!(!q.is_fractional(), "{}", q.prompt());
            assert!(!q.expression().contains(" / "), "{}", q.prompt());
        }
    }
    assert!(batch(Difficulty::Hard, 200, 41).iter().all(|q| !q.expression().contains("//")));
}

#[test]
fn build_batch_honours_count_for_every_tier() {
    let mut rng = make_rng(Some(5));
    for difficulty in Difficulty::ALL {
        let questions = build_batch(&mut rng, difficulty.default_question_count(), difficulty, 10_000).unwrap();
        assert_eq!(questions.len(), difficulty.default_question_count());
    }
}

// ── session flows ────────────────────────────────────────────────────────────

#[test]
fn easy_session_completes_after_thirty_advances() {
    let mut session = Session::with_seed(100);
    session.start(30, Difficulty::Easy).unwrap();
    assert_eq!(session.state(), SessionState::InProgress);
    for i in 0..30 {
        assert!(session.current_question().is_some(), "question {i} missing");
        session.advance();
    }
    assert_eq!(session.state(), SessionState::Complete);
    assert!(session.current_question().is_none());
    let result = session.result().unwrap();
    assert_eq!((result.score, result.total), (0, 30));
}

#[test]
fn perfect_run_scores_every_question() {
    let mut session = Session::with_seed(101);
    session.start(10, Difficulty::Hard).unwrap();
    while let Some(q) = session.current_question() {
        let answer = q.correct_text();
        let feedback = session.submit_answer(&answer).unwrap().unwrap();
        assert!(feedback.correct);
        session.advance();
    }
    assert_eq!(session.score(), 10);
    assert!(session.score() as usize <= session.question_count());
}

#[test]
fn wrong_hard_answer_on_question_five_restarts_with_new_batch() {
    let mut session = Session::with_seed(102);
    session.start(100, Difficulty::Hard).unwrap();
    for _ in 0..4 {
        let answer = session.current_question().unwrap().correct_text();
        session.submit_answer(&answer).unwrap();
        session.advance();
    }
    assert_eq!((session.cursor(), session.score()), (4, 4));
    let before: Vec<Question> = session.questions().to_vec();

    let wrong = wrong_option(session.current_question().unwrap());
    let feedback = session.submit_answer(&wrong).unwrap().unwrap();

    assert!(!feedback.correct);
    assert!(feedback.restarted);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.question_count(), 100);
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert!(session.questions() != before.as_slice());
}

#[test]
fn expired_hard_question_restarts_run() {
    let mut session = Session::with_seed(103);
    session.start(5, Difficulty::Hard).unwrap();
    let answer = session.current_question().unwrap().correct_text();
    session.submit_answer(&answer).unwrap();
    session.advance();
    let feedback = session.expire_current().unwrap().unwrap();
    assert!(feedback.restarted);
    assert_eq!((session.cursor(), session.score()), (0, 0));
}

#[test]
fn wrong_medium_answer_keeps_going() {
    let mut session = Session::with_seed(104);
    session.start(3, Difficulty::Medium).unwrap();
    let wrong = wrong_option(session.current_question().unwrap());
    let feedback = session.submit_answer(&wrong).unwrap().unwrap();
    assert!(!feedback.restarted);
    session.advance();
    assert_eq!(session.cursor(), 1);
}

#[test]
fn play_again_starts_fresh() {
    let mut session = Session::with_seed(105);
    session.start(2, Difficulty::Easy).unwrap();
    session.advance();
    session.advance();
    assert!(session.is_complete());
    session.restart().unwrap();
    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!((session.cursor(), session.question_count()), (0, 2));
}

// ── scoreboard ───────────────────────────────────────────────────────────────

#[test]
fn eleven_increasing_scores_keep_top_ten_and_reload_identically() {
    let path = temp_path("eleven");
    let mut store = ScoreboardStore::load(&path);
    for score in 1..=11 {
        store.record(&format!("p{score}"), score, 30, Difficulty::Easy).unwrap();
    }
    let scores: Vec<u32> = store.scoreboard().entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, (2..=11).rev().collect::<Vec<u32>>());

    let reloaded = ScoreboardStore::load(&path);
    fs::remove_file(&path).ok();
    assert_eq!(reloaded.scoreboard(), store.scoreboard());
}

#[test]
fn qualification_rules() {
    let mut board = Scoreboard::new();
    assert!(board.qualifies(0));
    for score in 10..20 {
        board.insert(ScoreEntry::now("p", score, 30, Difficulty::Medium));
    }
    assert!(!board.qualifies(10));
    assert!(!board.qualifies(0));
    assert!(board.qualifies(11));
}

#[test]
fn fresh_environment_has_empty_scoreboard() {
    let store = ScoreboardStore::load(temp_path("fresh_never_written"));
    assert!(store.scoreboard().is_empty());
}

#[test]
fn finished_session_flows_into_scoreboard() {
    let path = temp_path("flow");
    let mut session = Session::with_seed(106);
    session.start(3, Difficulty::Medium).unwrap();
    while let Some(q) = session.current_question() {
        let answer = q.correct_text();
        session.submit_answer(&answer).unwrap();
        session.advance();
    }
    let result = session.result().unwrap();

    let mut store = ScoreboardStore::load(&path);
    assert!(store.qualifies(result.score));
    let board = store.record_result("Ann", result).unwrap();
    let top = &board.entries()[0];
    assert_eq!((top.name.as_str(), top.score, top.total), ("Ann", 3, 3));
    assert_eq!(top.difficulty, Difficulty::Medium);
    fs::remove_file(&path).ok();
}
