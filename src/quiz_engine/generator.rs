use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::quiz_engine::{
    distractors::generate_distractors,
    error::{GenerationError, Result},
    models::{AnswerValue, Difficulty, Question, QuizRequest, OPTION_COUNT},
    synthesizer::synthesize,
};

/// Attempts allowed per question before the factory gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Seeded RNG when a seed is given, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// One full attempt: synthesize, pick options, shuffle, format.
fn try_build_question<R: Rng>(rng: &mut R, difficulty: Difficulty) -> Result<Question> {
    let (expr, correct) = synthesize(rng, difficulty)?;
    let distractors = generate_distractors(rng, correct)?;

    let mut pool: Vec<AnswerValue> = Vec::with_capacity(distractors.len() + 1);
    pool.push(correct);
    pool.extend(distractors);

    let mut picked: Vec<AnswerValue> = pool.choose_multiple(rng, OPTION_COUNT).copied().collect();
    if !picked.contains(&correct) {
        let slot = rng.gen_range(0..OPTION_COUNT);
        picked[slot] = correct;
    }
    picked.shuffle(rng);

    let options: [String; OPTION_COUNT] = picked
        .iter()
        .map(|v| v.format())
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|v: Vec<String>| GenerationError::InsufficientOptions { found: v.len() })?;

    Ok(Question::new(expr.to_string(), options, correct))
}

/// Build one question, redrawing on every retry signal.
///
/// Fails with `RetriesExhausted` only after `max_attempts` discarded draws,
/// which the tier parameters make practically unreachable.
pub fn build_question<R: Rng>(rng: &mut R, difficulty: Difficulty, max_attempts: u32) -> Result<Question> {
    for attempt in 1..=max_attempts {
        match try_build_question(rng, difficulty) {
            Ok(question) => {
                if attempt > 1 {
                    debug!("{difficulty} question built after {attempt} attempts");
                }
                return Ok(question);
            }
            Err(e) if e.is_retry() => continue,
            Err(e) => return Err(e),
        }
    }
    Err(GenerationError::RetriesExhausted { attempts: max_attempts })
}

/// Build `count` questions in generation order.
pub fn build_batch<R: Rng>(
    rng: &mut R,
    count: usize,
    difficulty: Difficulty,
    max_attempts: u32,
) -> Result<Vec<Question>> {
    let questions = (0..count)
        .map(|_| build_question(rng, difficulty, max_attempts))
        .collect::<Result<Vec<_>>>()?;
    info!("generated {count} {difficulty} questions");
    Ok(questions)
}

/// Convenience entry point: build the batch a [`QuizRequest`] describes.
pub fn generate_quiz(request: &QuizRequest) -> Result<Vec<Question>> {
    let mut rng = make_rng(request.rng_seed);
    build_batch(&mut rng, request.question_count, request.difficulty, DEFAULT_MAX_ATTEMPTS)
}
