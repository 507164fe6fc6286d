//! Plausible wrong answers near the correct value.
//!
//! Integral answers get an integer offset within a tenth of the answer's
//! magnitude (at least ±1). Fractional answers get a real offset within a
//! fifth of the magnitude, pushed out to at least ±0.1 so the options do not
//! collapse onto the correct value after rounding.

use rand::Rng;

use crate::quiz_engine::{
    error::{GenerationError, Result},
    helpers::round2,
    models::{AnswerValue, OPTION_COUNT},
};

/// Candidate draws per question.
pub const DISTRACTOR_DRAWS: usize = 5;

const MIN_FRACTIONAL_OFFSET: f64 = 0.1;

/// Draw one wrong-looking candidate near `correct`. May still coincide with
/// `correct` or an earlier draw; [`generate_distractors`] filters those.
pub fn draw_candidate<R: Rng>(rng: &mut R, correct: AnswerValue) -> AnswerValue {
    match correct {
        AnswerValue::Integer(n) => {
            let spread = (n.abs() / 10).max(1);
            let mut offset = rng.gen_range(-spread..=spread);
            if offset == 0 {
                offset = if rng.gen_bool(0.5) { 1 } else { -1 };
            }
            AnswerValue::Integer(n + offset)
        }
        AnswerValue::Fractional(x) => {
            let spread = x.abs() / 5.0;
            let mut offset = if spread > 0.0 { rng.gen_range(-spread..=spread) } else { 0.0 };
            if offset.abs() < MIN_FRACTIONAL_OFFSET {
                offset = if rng.gen_bool(0.5) { MIN_FRACTIONAL_OFFSET } else { -MIN_FRACTIONAL_OFFSET };
            }
            AnswerValue::Fractional(round2(x + offset))
        }
    }
}

/// Produce every distinct wrong value found in [`DISTRACTOR_DRAWS`] draws,
/// in draw order.
///
/// Distinctness is judged on the formatted option text. Fails with
/// `InsufficientOptions` when fewer than three distinct wrong values turn up;
/// the caller should throw the whole question away and start over.
pub fn generate_distractors<R: Rng>(rng: &mut R, correct: AnswerValue) -> Result<Vec<AnswerValue>> {
    let mut seen = vec![correct.format()];
    let mut distractors = Vec::with_capacity(DISTRACTOR_DRAWS);

    for _ in 0..DISTRACTOR_DRAWS {
        let candidate = draw_candidate(rng, correct);
        let text = candidate.format();
        if !seen.contains(&text) {
            seen.push(text);
            distractors.push(candidate);
        }
    }

    if distractors.len() < OPTION_COUNT - 1 {
        return Err(GenerationError::InsufficientOptions { found: seen.len() });
    }
    Ok(distractors)
}
