use std::io;
use std::path::PathBuf;

use evmerge_engine::MergeError;

/// Errors produced by the harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// I/O error reading or writing a file.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A config file could not be parsed.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A config value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The engine rejected its input.
    #[error("merge rejected: {0}")]
    Merge(#[from] MergeError),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the harness crate.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;
