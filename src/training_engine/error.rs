use std::path::PathBuf;

/// Everything the trainer can fail with.
///
/// Wrong-stage submissions are not errors: those operations return `None`.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    #[error("dataset has no questions")]
    EmptyDataset,
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
    #[error("no quiz mode selected")]
    NoModeSelected,
}

impl TrainerError {
    /// Errors that mean the dataset could not be fetched or parsed; the host
    /// shows a retry view for these instead of an empty-content view.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            TrainerError::Io { .. } | TrainerError::Parse(_) | TrainerError::InvalidDataset(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
