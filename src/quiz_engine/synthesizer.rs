//! Arithmetic synthesis: draw an expression for a tier, evaluate it, and
//! classify the result.
//!
//! Evaluation follows the usual reading of the rendered prompt:
//! multiplicative operators (`*`, `//`, `/`) bind tighter than `+` and `-`,
//! and operators of equal precedence chain left to right. An expression
//! containing real division is evaluated in floating point and rounded to two
//! decimals; everything else stays in exact integer arithmetic.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz_engine::{
    error::{GenerationError, Result},
    helpers::round2,
    models::{AnswerValue, Difficulty, Expression, Operator},
};

/// Largest absolute value any answer may have.
pub const MAX_MAGNITUDE: f64 = 5000.0;
/// Largest absolute value a fractional answer may have.
pub const MAX_FRACTIONAL_MAGNITUDE: f64 = 999.0;

/// Draw a two- or three-operand expression for `difficulty`.
pub fn draw_expression<R: Rng>(rng: &mut R, difficulty: Difficulty) -> Expression {
    let params = difficulty.params();
    let pick = |rng: &mut R| *params.operators.choose(rng).unwrap_or(&Operator::Add);

    let first = rng.gen_range(params.min..=params.max);
    // Divisors never reach zero.
    let second = rng.gen_range(params.min.max(1)..=params.max);
    let op1 = pick(rng);

    if params.three_part_chance > 0.0 && rng.gen_bool(params.three_part_chance) {
        let third = rng.gen_range((params.min / 2).max(1)..=params.max / 2);
        let op2 = pick(rng);
        Expression { operands: vec![first, second, third], operators: vec![op1, op2] }
    } else {
        Expression { operands: vec![first, second], operators: vec![op1] }
    }
}

/// Evaluate `expr`, tagging the value as fractional when real division is used.
pub fn evaluate(expr: &Expression) -> Result<AnswerValue> {
    if expr.operands.len() != expr.operators.len() + 1 {
        return Err(GenerationError::InvalidExpression);
    }
    if expr.is_fractional() {
        evaluate_with(expr, |n| n as f64, apply_real)
            .filter(|x| x.is_finite())
            .map(|x| AnswerValue::Fractional(round2(x)))
            .ok_or(GenerationError::InvalidExpression)
    } else {
        evaluate_with(expr, |n| n, apply_integer)
            .map(AnswerValue::Integer)
            .ok_or(GenerationError::InvalidExpression)
    }
}

/// Reject answers too large to make a fair multiple-choice question.
pub fn check_magnitude(value: AnswerValue) -> Result<AnswerValue> {
    let magnitude = value.as_f64().abs();
    let limit = if value.is_fractional() { MAX_FRACTIONAL_MAGNITUDE } else { MAX_MAGNITUDE };
    if magnitude > limit {
        return Err(GenerationError::OutOfRange { value: value.as_f64(), limit });
    }
    Ok(value)
}

/// Draw, evaluate and range-check one expression.
///
/// Any error is a retry signal for the caller.
pub fn synthesize<R: Rng>(rng: &mut R, difficulty: Difficulty) -> Result<(Expression, AnswerValue)> {
    let expr = draw_expression(rng, difficulty);
    let value = evaluate(&expr).and_then(check_magnitude).map_err(|e| {
        debug!("discarding '{expr}': {e}");
        e
    })?;
    Ok((expr, value))
}

// ---------------------------------------------------------------------------
// Evaluation internals
// ---------------------------------------------------------------------------

/// Two-level precedence evaluation. Multiplicative runs collapse first, then
/// the remaining additive chain folds left to right.
fn evaluate_with<T: Copy>(
    expr: &Expression,
    lift: impl Fn(i64) -> T,
    apply: impl Fn(T, Operator, T) -> Option<T>,
) -> Option<T> {
    let (first, rest) = expr.operands.split_first()?;
    let mut terms = vec![lift(*first)];
    let mut additive = Vec::new();

    for (&op, &n) in expr.operators.iter().zip(rest) {
        if op.is_multiplicative() {
            let last = terms.pop()?;
            terms.push(apply(last, op, lift(n))?);
        } else {
            additive.push(op);
            terms.push(lift(n));
        }
    }

    let (head, tail) = terms.split_first()?;
    additive
        .into_iter()
        .zip(tail)
        .try_fold(*head, |acc, (op, &term)| apply(acc, op, term))
}

fn apply_integer(a: i64, op: Operator, b: i64) -> Option<i64> {
    match op {
        Operator::Add      => a.checked_add(b),
        Operator::Sub      => a.checked_sub(b),
        Operator::Mul      => a.checked_mul(b),
        Operator::FloorDiv => floor_div(a, b),
        Operator::Div      => None,
    }
}

fn apply_real(a: f64, op: Operator, b: f64) -> Option<f64> {
    match op {
        Operator::Add => Some(a + b),
        Operator::Sub => Some(a - b),
        Operator::Mul => Some(a * b),
        Operator::FloorDiv | Operator::Div if b == 0.0 => None,
        Operator::FloorDiv => Some((a / b).floor()),
        Operator::Div      => Some(a / b),
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}
