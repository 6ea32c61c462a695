//! # vehicle_drill
//!
//! A multiple-choice trainer for recognising military vehicle classes and
//! platform names from pictures, driven by static per-branch JSON data.
//!
//! ## How it works
//!
//! 1. Load a [`Dataset`] for a [`Branch`] (Landmacht, Luchtmacht, Marine).
//! 2. Wrap it in a [`QuizSession`] and pick a [`QuizMode`]; the session
//!    samples a round, avoiding the questions of the previous round when it
//!    can.
//! 3. Feed the learner's picks into `submit_classification` / `submit_name`
//!    and call `advance` when the host is done showing feedback. The session
//!    tracks streaks, per-round scores and an attempt log, and hands back a
//!    [`RoundSummary`] when the round ends.
//!
//! ## Key features
//!
//! - **Deterministic**: `SessionConfig::seeded(u64)` reproduces the exact same
//!   rounds and option orders.
//! - **Two modes**: `ClassOnly` (classification, then Next) and
//!   `ClassAndName` (classification, platform name, reveal).
//! - **Race tolerant**: wrong-stage calls are no-ops, and a [`StepToken`]
//!   lets delayed callbacks drop themselves once the session has moved on.
//!
//! ## Quick start
//!
//! ```rust
//! use vehicle_drill::{AdvanceOutcome, Dataset, QuizMode, QuizSession, SessionConfig};
//!
//! let dataset = Dataset::from_json(r#"{
//!     "questions": [
//!         {"id": "1", "asset": "leopard-2", "class": "Tank", "answer": "Leopard 2"},
//!         {"id": "2", "asset": "boxer", "class": "APC", "answer": "Boxer"}
//!     ],
//!     "vehicleClasses": ["Tank", "APC", "Truck"],
//!     "quizLength": 2,
//!     "mcqOptions": 3
//! }"#).unwrap();
//!
//! let mut session = QuizSession::new(dataset, SessionConfig::seeded(42)).unwrap();
//! session.select_mode(QuizMode::ClassOnly).unwrap();
//!
//! loop {
//!     let pick = session.choices()[0].clone();
//!     let feedback = session.submit_classification(&pick).unwrap();
//!     println!("{pick}: correct={} (answer {})", feedback.is_correct, feedback.correct_value);
//!     if let Some(AdvanceOutcome::RoundComplete(summary)) = session.advance() {
//!         println!("{}/{} correct", summary.correct, summary.round_len);
//!         break;
//!     }
//! }
//! ```

pub mod training_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `vehicle_drill::QuizSession`
// directly without reaching into `training_engine::`.
pub use training_engine::{
    build_choices, build_round, AdvanceOutcome, AttemptLog, AttemptRecord, Branch,
    ClassTally, Dataset, Feedback, Phase, Question, QuizMode, QuizSession, Result, Round,
    RoundSummary, ScoreBoard, SessionConfig, Stage, StepToken, TeacherGate, TeacherReport,
    TrainerError, TrainerSettings,
};
pub use view_adapter::to_view_state;

#[cfg(test)]
mod tests;
