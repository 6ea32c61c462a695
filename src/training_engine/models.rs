use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dataset primitives
// ---------------------------------------------------------------------------

/// One picture-identification item as loaded from the branch JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Opaque image reference, resolved by the host.
    pub asset: String,
    pub class: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Quiz mode chosen on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
    /// Classification only; "Next" follows every answer.
    ClassOnly,
    /// Classification, then the platform name, then a reveal.
    ClassAndName,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::ClassOnly    => write!(f, "Classification only"),
            QuizMode::ClassAndName => write!(f, "Classification + naming"),
        }
    }
}

impl QuizMode {
    pub fn includes_naming(self) -> bool {
        matches!(self, QuizMode::ClassAndName)
    }
}

/// Sub-step within a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Classification,
    Naming,
    Reveal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Classification => write!(f, "classification"),
            Stage::Naming         => write!(f, "naming"),
            Stage::Reveal         => write!(f, "reveal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Answer feedback / attempt records
// ---------------------------------------------------------------------------

/// Result of one stage submission. The correct value is always revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub stage: Stage,
    pub is_correct: bool,
    pub chosen: String,
    pub correct_value: String,
}

/// One question's outcome within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub question_id: String,
    pub asset: String,
    pub correct_class: String,
    pub chosen_class: String,
    pub ok_class: bool,
    pub correct_name: String,
    pub chosen_name: Option<String>,
    /// `None` in ClassOnly mode or until the naming stage is answered.
    pub ok_name: Option<bool>,
}

impl AttemptRecord {
    /// True once every stage the mode asks for has been answered.
    pub fn is_closed(&self, mode: QuizMode) -> bool {
        !mode.includes_naming() || self.ok_name.is_some()
    }
}

/// Emitted once when `advance()` walks past the last question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub mode: QuizMode,
    pub correct: u32,
    pub answered: u32,
    pub round_len: usize,
    pub best_streak: u32,
    pub attempts: Vec<AttemptRecord>,
}

// ---------------------------------------------------------------------------
// Session configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed seed for reproducible rounds and option orders; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl SessionConfig {
    pub fn seeded(seed: u64) -> Self {
        SessionConfig { rng_seed: Some(seed) }
    }
}
