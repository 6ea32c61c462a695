//! Small display helpers shared by the view adapter and the terminal front-end.
//!
//! The session only produces raw state; these turn it into the labels the
//! original trainer screens show (step hint, feedback line, progress).

use crate::training_engine::models::{Feedback, QuizMode, Stage};

/// Hint shown above the option grid.
pub fn step_label(mode: QuizMode, stage: Stage) -> &'static str {
    match (mode, stage) {
        (QuizMode::ClassOnly, _)                      => "Step: choose the classification.",
        (QuizMode::ClassAndName, Stage::Classification) => "Step 1: choose the classification.",
        (QuizMode::ClassAndName, Stage::Naming)         => "Step 2: choose the platform name.",
        (QuizMode::ClassAndName, Stage::Reveal)         => "Correct answer",
    }
}

/// One-line verdict; always names the correct value.
pub fn feedback_line(feedback: &Feedback) -> String {
    let what = match feedback.stage {
        Stage::Naming => "name",
        _             => "classification",
    };
    if feedback.is_correct {
        format!("Correct {what}: {}", feedback.correct_value)
    } else {
        format!("Incorrect. Correct {what}: {}", feedback.correct_value)
    }
}

/// Whole-percent progress through a round (0 for an empty round).
pub fn progress_percent(index: usize, len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    ((index.min(len) as f64 / len as f64) * 100.0).round() as u32
}
