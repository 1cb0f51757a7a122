use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file {path} does not hold a number: {contents:?}")]
    Parse { path: PathBuf, contents: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
