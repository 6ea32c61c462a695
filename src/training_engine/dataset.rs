//! Branch datasets: JSON parsing, shape validation, and the branch catalog.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::training_engine::{
    error::{Result, TrainerError},
    models::Question,
};

const DEFAULT_QUIZ_LENGTH: usize = 10;
const DEFAULT_MCQ_OPTIONS: usize = 6;

fn default_quiz_length() -> usize { DEFAULT_QUIZ_LENGTH }
fn default_mcq_options() -> usize { DEFAULT_MCQ_OPTIONS }

/// Everything one branch's quiz is built from. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<Question>,
    pub vehicle_classes: Vec<String>,
    #[serde(default = "default_quiz_length")]
    pub quiz_length: usize,
    #[serde(default = "default_mcq_options")]
    pub mcq_options: usize,
    #[serde(default)]
    pub speaking_prompts: Vec<String>,
}

impl Dataset {
    /// Parse and validate a dataset document.
    pub fn from_json(text: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read, parse and validate a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrainerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&text)?;
        info!(
            "loaded {} questions and {} classes from {}",
            dataset.questions.len(),
            dataset.vehicle_classes.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Check the invariants the round and choice builders rely on.
    ///
    /// An empty question list is allowed here; it surfaces later as
    /// [`TrainerError::EmptyDataset`] when a round is requested.
    pub fn validate(&self) -> Result<()> {
        if self.quiz_length == 0 {
            return Err(TrainerError::InvalidDataset("quizLength must be positive".into()));
        }
        if self.mcq_options < 2 {
            return Err(TrainerError::InvalidDataset(format!(
                "mcqOptions must be at least 2 (got {})",
                self.mcq_options
            )));
        }
        if self.vehicle_classes.is_empty() {
            return Err(TrainerError::InvalidDataset("vehicleClasses must not be empty".into()));
        }
        let classes: HashSet<&str> = self.vehicle_classes.iter().map(String::as_str).collect();
        let mut ids = HashSet::with_capacity(self.questions.len());
        for q in &self.questions {
            if q.id.trim().is_empty() {
                return Err(TrainerError::InvalidDataset(format!(
                    "question with asset '{}' has an empty id",
                    q.asset
                )));
            }
            if !ids.insert(q.id.as_str()) {
                return Err(TrainerError::InvalidDataset(format!("duplicate question id '{}'", q.id)));
            }
            if !classes.contains(q.class.as_str()) {
                return Err(TrainerError::InvalidDataset(format!(
                    "question '{}' has class '{}' outside vehicleClasses",
                    q.id, q.class
                )));
            }
        }
        debug!("dataset validated: {} unique ids", ids.len());
        Ok(())
    }

    /// Round size actually achievable with this dataset.
    pub fn round_len(&self) -> usize {
        self.quiz_length.min(self.questions.len())
    }

    /// Distractor pool for the naming stage: every question's answer.
    pub fn name_pool(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.answer.clone()).collect()
    }

    /// Classes listed on the theory page.
    pub fn theory(&self) -> &[String] {
        &self.vehicle_classes
    }
}

// ---------------------------------------------------------------------------
// Branch catalog
// ---------------------------------------------------------------------------

/// Practice branch; each has its own dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    Landmacht,
    Luchtmacht,
    Marine,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Branch {
    pub const ALL: [Branch; 3] = [Branch::Landmacht, Branch::Luchtmacht, Branch::Marine];

    pub fn id(self) -> &'static str {
        match self {
            Branch::Landmacht  => "landmacht",
            Branch::Luchtmacht => "luchtmacht",
            Branch::Marine     => "marine",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Branch::Landmacht  => "Landmacht",
            Branch::Luchtmacht => "Luchtmacht",
            Branch::Marine     => "Marine",
        }
    }

    /// Parse a branch id (case-insensitive).
    pub fn from_id(id: &str) -> Result<Self> {
        Branch::ALL
            .into_iter()
            .find(|b| b.id().eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| TrainerError::UnknownBranch(id.to_string()))
    }

    /// `<data_dir>/<id>.json`
    pub fn data_path(self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(format!("{}.json", self.id()))
    }

    pub fn load(self, data_dir: impl AsRef<Path>) -> Result<Dataset> {
        Dataset::load(self.data_path(data_dir))
    }
}
