//! Small numeric and formatting helpers shared by the generator, the session
//! engine, and the UI snapshot adapter.
//!
//! Option strings are the unit of identity for a question: two values that
//! format to the same text are the same option. Everything that decides
//! whether two candidates collide goes through [`format_fractional`] or
//! `i64::to_string`, never through raw float comparison.

use crate::quiz_engine::models::AnswerValue;

/// Round to two decimal places, ties to even, folding `-0.0` into `0.0`.
pub fn round2(x: f64) -> f64 {
    let r = (x * 100.0).round_ties_even() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}

/// Render a fractional value as `%.2f`.
pub fn format_fractional(x: f64) -> String {
    format!("{:.2}", round2(x))
}

/// Parse option text as the given kind; `None` when malformed.
pub fn parse_option(text: &str, fractional: bool) -> Option<AnswerValue> {
    let text = text.trim();
    if fractional {
        text.parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(AnswerValue::Fractional)
    } else {
        text.parse::<i64>().ok().map(AnswerValue::Integer)
    }
}

/// Letter shown in front of option `index` (`0 → 'A'`).
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Option line as shown on a button (e.g. `"B. 17"`).
pub fn option_label(index: usize, text: &str) -> String {
    format!("{}. {}", option_letter(index), text)
}

/// Inverse of [`option_letter`], accepting lower case.
pub fn letter_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper.is_ascii_uppercase().then(|| (upper as u8 - b'A') as usize)
}
