//! Error types for the converter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, converting, or writing motion data.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The source provider could not be created from the given path.
    #[error("Failed to load body data from {path}: {reason}")]
    ProviderLoad { path: PathBuf, reason: String },

    /// An expected key is absent from the source data.
    #[error("Missing key in xsens data: '{key}' (available keys: {})", available.join(", "))]
    MissingKey { key: String, available: Vec<String> },

    /// A flat array cannot be reshaped to `(frames, parts, components)`.
    #[error(
        "Cannot reshape '{key}' of {len} elements into ({frames}, {parts}, {components})"
    )]
    ShapeMismatch {
        key: String,
        len: usize,
        frames: usize,
        parts: usize,
        components: usize,
    },

    /// A scalar field is empty or holds a value of the wrong kind.
    #[error("Invalid scalar value for '{key}': {reason}")]
    InvalidScalar { key: String, reason: String },

    /// The `.npz` archive could not be read.
    #[error("Failed to read npz archive: {0}")]
    Npz(#[from] ndarray_npy::ReadNpzError),

    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested file does not exist.
    #[error("File not found at {0}")]
    NotFound(PathBuf),

    /// The record file could not be encoded or decoded.
    #[error("Record encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is malformed.
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
