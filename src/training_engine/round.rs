use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;

use crate::training_engine::{
    dataset::Dataset,
    error::{Result, TrainerError},
    models::Question,
    randomizer::sample_without_replacement,
};

/// One play-through of a sampled subset of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub items: Vec<Question>,
    /// Current position; `index == items.len()` means the round is over.
    pub index: usize,
}

impl Round {
    pub fn current(&self) -> Option<&Question> {
        self.items.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.items.len()
    }

    pub fn ids(&self) -> HashSet<String> {
        self.items.iter().map(|q| q.id.clone()).collect()
    }
}

/// Sample a new round, steering clear of `avoid_ids` when the dataset is big
/// enough to fill a whole round without them.
pub fn build_round<R: Rng + ?Sized>(
    rng: &mut R,
    dataset: &Dataset,
    avoid_ids: &HashSet<String>,
) -> Result<Round> {
    if dataset.questions.is_empty() {
        return Err(TrainerError::EmptyDataset);
    }
    let wanted = dataset.round_len();

    let fresh: Vec<Question> = dataset
        .questions
        .iter()
        .filter(|q| !avoid_ids.contains(&q.id))
        .cloned()
        .collect();

    let items = if fresh.len() >= wanted {
        sample_without_replacement(rng, &fresh, wanted)
    } else {
        if !avoid_ids.is_empty() {
            warn!(
                "only {} questions outside the previous round (need {}); allowing repeats",
                fresh.len(), wanted
            );
        }
        sample_without_replacement(rng, &dataset.questions, wanted)
    };

    debug!("built round of {} questions", items.len());
    Ok(Round { items, index: 0 })
}
