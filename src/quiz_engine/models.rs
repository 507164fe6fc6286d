use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::quiz_engine::helpers::{format_fractional, parse_option};

// ---------------------------------------------------------------------------
// Difficulty tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Fixed generation parameters for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierParams {
    pub min: i64,
    pub max: i64,
    pub operators: &'static [Operator],
    /// Chance of drawing a third operand and a second operator.
    pub three_part_chance: f64,
}

const EASY_OPS: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];
const MEDIUM_OPS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::FloorDiv];
const HARD_OPS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

/// Seconds a Hard question stays open before it counts as wrong.
pub const HARD_TIME_LIMIT_SECS: u64 = 15;

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn params(self) -> TierParams {
        match self {
            Difficulty::Easy   => TierParams { min: 1,  max: 12,  operators: &EASY_OPS,   three_part_chance: 0.0 },
            Difficulty::Medium => TierParams { min: 10, max: 50,  operators: &MEDIUM_OPS, three_part_chance: 0.0 },
            Difficulty::Hard   => TierParams { min: 20, max: 100, operators: &HARD_OPS,   three_part_chance: 0.4 },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy   => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard   => "Hard",
        }
    }

    /// Batch length offered by the game menu for this tier.
    pub fn default_question_count(self) -> usize {
        match self {
            Difficulty::Easy   => 30,
            Difficulty::Medium => 50,
            Difficulty::Hard   => 100,
        }
    }

    /// Per-question time limit; only Hard is timed.
    pub fn time_limit(self) -> Option<Duration> {
        match self {
            Difficulty::Hard => Some(Duration::from_secs(HARD_TIME_LIMIT_SECS)),
            _ => None,
        }
    }

    /// Whether a wrong or expired answer throws away the whole run.
    pub fn restarts_on_failure(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy"   => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard"   => Ok(Difficulty::Hard),
            other    => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    /// Integer division, rounding toward negative infinity.
    FloorDiv,
    /// Real division.
    Div,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add      => "+",
            Operator::Sub      => "-",
            Operator::Mul      => "*",
            Operator::FloorDiv => "//",
            Operator::Div      => "/",
        }
    }

    /// Multiplicative operators bind tighter than additive ones.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Mul | Operator::FloorDiv | Operator::Div)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A drawn expression: `operands.len() == operators.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub operands: Vec<i64>,
    pub operators: Vec<Operator>,
}

impl Expression {
    /// True when the expression uses real division anywhere.
    pub fn is_fractional(&self) -> bool {
        self.operators.contains(&Operator::Div)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operands = self.operands.iter();
        if let Some(first) = operands.next() {
            write!(f, "{first}")?;
        }
        for (op, n) in self.operators.iter().zip(operands) {
            write!(f, " {op} {n}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Answers and questions
// ---------------------------------------------------------------------------

/// Submissions within this distance of a fractional answer count as correct.
pub const FRACTIONAL_TOLERANCE: f64 = 0.001;

/// The numeric answer of a question, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnswerValue {
    Integer(i64),
    /// Always rounded to two decimal places.
    Fractional(f64),
}

impl AnswerValue {
    pub fn is_fractional(self) -> bool {
        matches!(self, AnswerValue::Fractional(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            AnswerValue::Integer(n)    => n as f64,
            AnswerValue::Fractional(x) => x,
        }
    }

    /// Option text as shown to the player (`"42"` or `"3.14"`).
    pub fn format(self) -> String {
        match self {
            AnswerValue::Integer(n)    => n.to_string(),
            AnswerValue::Fractional(x) => format_fractional(x),
        }
    }

    /// Check a selected option text against this value.
    ///
    /// Unparseable text is simply wrong. Integers must match exactly;
    /// fractions are compared with [`FRACTIONAL_TOLERANCE`].
    pub fn matches(self, selected: &str) -> bool {
        match (self, parse_option(selected, self.is_fractional())) {
            (AnswerValue::Integer(n), Some(AnswerValue::Integer(m))) => n == m,
            (AnswerValue::Fractional(x), Some(AnswerValue::Fractional(y))) => {
                (x - y).abs() < FRACTIONAL_TOLERANCE
            }
            _ => false,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Number of options shown for every question.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    expression: String,
    options: [String; OPTION_COUNT],
    answer: AnswerValue,
}

impl Question {
    /// Only the factory assembles questions; it guarantees the option invariants.
    pub(crate) fn new(expression: String, options: [String; OPTION_COUNT], answer: AnswerValue) -> Self {
        Question {
            prompt: format!("What is {expression}?"),
            expression,
            options,
            answer,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn answer(&self) -> AnswerValue {
        self.answer
    }

    pub fn is_fractional(&self) -> bool {
        self.answer.is_fractional()
    }

    /// The formatted correct option.
    pub fn correct_text(&self) -> String {
        self.answer.format()
    }

    /// Position of the correct option in [`Question::options`].
    pub fn correct_index(&self) -> usize {
        let correct = self.correct_text();
        self.options
            .iter()
            .position(|o| *o == correct)
            .unwrap_or_default()
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer.matches(selected)
    }
}

// ---------------------------------------------------------------------------
// Session request / outcome types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub rng_seed: Option<u64>,
}

impl QuizRequest {
    /// Default batch length for the tier, fresh entropy.
    pub fn new(difficulty: Difficulty) -> Self {
        QuizRequest {
            difficulty,
            question_count: difficulty.default_question_count(),
            rng_seed: None,
        }
    }
}

/// What the player sees right after answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// The correct option text, for highlighting.
    pub correct_text: String,
    pub correct_index: usize,
    /// Set when the failure wiped the run and a fresh batch was generated.
    pub restarted: bool,
}

/// Final tally of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_renders_with_spaced_operators() {
        let expr = Expression {
            operands: vec![40, 7, 12],
            operators: vec![Operator::FloorDiv, Operator::Sub],
        };
        assert_eq!(expr.to_string(), "40 // 7 - 12");
        assert!(!expr.is_fractional());
    }

    #[test]
    fn difficulty_parses_labels_case_insensitively() {
        for d in Difficulty::ALL {
            assert_eq!(d.label().to_uppercase().parse::<Difficulty>(), Ok(d));
        }
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn only_hard_is_timed() {
        assert_eq!(Difficulty::Easy.time_limit(), None);
        assert_eq!(Difficulty::Medium.time_limit(), None);
        assert_eq!(Difficulty::Hard.time_limit(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn integer_answers_need_exact_match() {
        let v = AnswerValue::Integer(42);
        assert!(v.matches("42"));
        assert!(v.matches(" 42 "));
        assert!(!v.matches("41"));
        assert!(!v.matches("42.0"));
        assert!(!v.matches("forty-two"));
    }

    #[test]
    fn fractional_answers_use_tolerance() {
        let v = AnswerValue::Fractional(3.14);
        assert!(v.matches("3.14"));
        assert!(v.matches("3.1405"));
        assert!(!v.matches("3.15"));
        assert!(!v.matches("3.142"));
        assert!(!v.matches(""));
    }

    #[test]
    fn correct_index_points_at_answer() {
        let q = Question::new(
            "6 * 7".into(),
            ["40".into(), "41".into(), "42".into(), "43".into()],
            AnswerValue::Integer(42),
        );
        assert_eq!(q.prompt(), "What is 6 * 7?");
        assert_eq!(q.correct_index(), 2);
        assert!(q.is_correct("42"));
    }
}
