//! Teacher overview of attempt records, and the PIN check in front of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::training_engine::models::AttemptRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTally {
    pub class: String,
    pub attempts: u32,
    pub correct: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherReport {
    pub attempts: u32,
    pub class_correct: u32,
    /// Naming stats only cover records where the naming stage was answered.
    pub named: u32,
    pub name_correct: u32,
    pub by_class: Vec<ClassTally>,
    pub misses: Vec<AttemptRecord>,
}

impl TeacherReport {
    pub fn build(records: &[AttemptRecord]) -> Self {
        let mut report = TeacherReport::default();
        let mut by_class: BTreeMap<&str, ClassTally> = BTreeMap::new();

        for rec in records {
            report.attempts += 1;
            if rec.ok_class {
                report.class_correct += 1;
            }
            if let Some(ok) = rec.ok_name {
                report.named += 1;
                if ok {
                    report.name_correct += 1;
                }
            }

            let tally = by_class
                .entry(rec.correct_class.as_str())
                .or_insert_with(|| ClassTally { class: rec.correct_class.clone(), ..Default::default() });
            tally.attempts += 1;
            if rec.ok_class {
                tally.correct += 1;
            }

            if !rec.ok_class || rec.ok_name == Some(false) {
                report.misses.push(rec.clone());
            }
        }

        report.by_class = by_class.into_values().collect();
        report
    }

    pub fn class_accuracy(&self) -> f32 {
        ratio(self.class_correct, self.attempts)
    }

    /// `None` when no naming answers were recorded (ClassOnly rounds).
    pub fn name_accuracy(&self) -> Option<f32> {
        (self.named > 0).then(|| ratio(self.name_correct, self.named))
    }
}

fn ratio(num: u32, den: u32) -> f32 {
    if den == 0 { return 0.0; }
    num as f32 / den as f32
}

/// Locally stored PIN in front of the report view.
///
/// A plain string comparison on the learner's own device: it keeps casual
/// hands off the overview, nothing more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherGate {
    pin: Option<String>,
}

impl TeacherGate {
    pub fn new(pin: Option<String>) -> Self {
        let pin = pin.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        TeacherGate { pin }
    }

    pub fn is_locked(&self) -> bool {
        self.pin.is_some()
    }

    /// An unset PIN leaves the report open.
    pub fn unlock(&self, candidate: &str) -> bool {
        match &self.pin {
            None      => true,
            Some(pin) => pin == candidate.trim(),
        }
    }
}
