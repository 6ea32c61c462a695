//! Multiple-choice option sets: the correct value once, plus unique distractors.

use std::collections::HashSet;

use log::warn;
use rand::Rng;

use crate::training_engine::randomizer::shuffle;

/// Build up to `k` distinct options containing `correct` exactly once.
///
/// The pool is deduplicated and `correct` removed before distractors are
/// drawn. When the pool has fewer than `k - 1` distinct distractors the result
/// is shorter than `k`; it is never padded.
pub fn build_choices<R: Rng + ?Sized>(
    rng: &mut R,
    correct: &str,
    pool: &[String],
    k: usize,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(pool.len());
    let distractors: Vec<String> = pool
        .iter()
        .map(String::as_str)
        .filter(|v| *v != correct && seen.insert(*v))
        .map(str::to_string)
        .collect();

    let wanted = k.saturating_sub(1);
    if distractors.len() < wanted {
        warn!(
            "only {} distractors available for '{}' (wanted {})",
            distractors.len(), correct, wanted
        );
    }

    let mut picked = shuffle(rng, distractors);
    picked.truncate(wanted);
    if k > 0 {
        picked.push(correct.to_string());
    }
    shuffle(rng, picked)
}
