//! Level loading error types.

use std::path::PathBuf;

/// Errors that can occur when reading, writing, or resolving a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write level {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for a [`Level`](polarcraft_world::Level).
    #[error("failed to parse level {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize level: {0}")]
    Serialize(#[source] ron::Error),

    /// Neither a built-in level name nor an existing file.
    #[error("unknown level `{0}`")]
    Unknown(String),
}
