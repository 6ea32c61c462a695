use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::training_engine::error::{Result, TrainerError};

/// Local settings file; the only thing kept between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerSettings {
    pub teacher_pin: Option<String>,
    pub data_dir: PathBuf,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        TrainerSettings {
            teacher_pin: None,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl TrainerSettings {
    /// Defaults when `path` does not exist; an unreadable or malformed file
    /// is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| TrainerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| TrainerError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
