//! Error types shared by the library and the CLI.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown item category '{0}'")]
    UnknownCategory(String),

    #[error("item category '{0}' has no candidates")]
    EmptyCategory(String),

    /// Placement chance must lie strictly between 0 and 100.
    #[error("invalid placement chance {chance} for category '{category}'")]
    InvalidChance { category: String, chance: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
