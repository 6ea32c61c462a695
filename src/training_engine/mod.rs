//! Core training engine: datasets, option/round building, and the quiz session.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: questions, modes, stages, feedback, attempt records |
//! | `error`       | `TrainerError` and the crate `Result` alias |
//! | `randomizer`  | Fisher-Yates shuffle and sampling without replacement |
//! | `choices`     | Multiple-choice option sets with unique distractors |
//! | `round`       | Round selection that avoids the previous round's questions |
//! | `dataset`     | Branch JSON loading, validation, and the branch catalog |
//! | `attempt_log` | Per-question answer records for the report view |
//! | `session`     | The quiz state machine: stages, scoring, streaks, round end |
//! | `report`      | Teacher overview built from attempt records, PIN gate |
//! | `settings`    | Local settings file (teacher PIN, data directory) |
//! | `helpers`     | Display labels shared by front-ends |

pub mod attempt_log;
pub mod choices;
pub mod dataset;
pub mod error;
pub mod helpers;
pub mod models;
pub mod randomizer;
pub mod report;
pub mod round;
pub mod session;
pub mod settings;

// Re-export the public API surface so callers can use
// `training_engine::QuizSession` without reaching into sub-modules.
pub use attempt_log::AttemptLog;
pub use choices::build_choices;
pub use dataset::{Branch, Dataset};
pub use error::{Result, TrainerError};
pub use models::{
    AttemptRecord, Feedback, Question, QuizMode, RoundSummary, SessionConfig, Stage,
};
pub use report::{ClassTally, TeacherGate, TeacherReport};
pub use round::{build_round, Round};
pub use session::{AdvanceOutcome, Phase, QuizSession, ScoreBoard, StepToken};
pub use settings::TrainerSettings;
