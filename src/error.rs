// ABOUTME: Application-wide error types for sequester.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("inventory file not found: {0}")]
    InventoryNotFound(PathBuf),

    #[error("unknown instance: {0}")]
    UnknownInstance(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("cloud operation failed: {0}")]
    Cloud(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
