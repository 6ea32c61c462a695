use serde::{Deserialize, Serialize};

use crate::training_engine::models::{AttemptRecord, Question};

/// Per-round record of answers, one entry per question.
///
/// Records are appended when a classification is answered and only ever
/// touched again to fill in the naming outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptLog {
    records: Vec<AttemptRecord>,
}

impl AttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a record for `question`. A second call for the same question id
    /// is ignored and returns `false`.
    pub fn record_classification(&mut self, question: &Question, chosen: &str) -> bool {
        if self.find(&question.id).is_some() {
            return false;
        }
        self.records.push(AttemptRecord {
            question_id: question.id.clone(),
            asset: question.asset.clone(),
            correct_class: question.class.clone(),
            chosen_class: chosen.to_string(),
            ok_class: chosen == question.class,
            correct_name: question.answer.clone(),
            chosen_name: None,
            ok_name: None,
        });
        true
    }

    /// Fill in the naming outcome. Returns `false` when there is no open
    /// record for `question_id` or its name was already recorded.
    pub fn record_name(&mut self, question_id: &str, chosen: &str) -> bool {
        match self.records.iter_mut().find(|r| r.question_id == question_id) {
            Some(rec) if rec.ok_name.is_none() => {
                rec.ok_name = Some(chosen == rec.correct_name);
                rec.chosen_name = Some(chosen.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn find(&self, question_id: &str) -> Option<&AttemptRecord> {
        self.records.iter().find(|r| r.question_id == question_id)
    }

    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Close the log and hand the records over, e.g. into a round summary.
    pub fn into_records(self) -> Vec<AttemptRecord> {
        self.records
    }
}
