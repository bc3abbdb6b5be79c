use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FqcnError {
    #[error("Invalid namespace: '{0}'")]
    InvalidNamespace(String),
    #[error("Invalid base path: {0} is not a directory")]
    InvalidBasePath(PathBuf),
    #[error("{target} is not from the same base as {base}")]
    NamespaceMismatch { target: String, base: String },
    #[error("Could not find registered psr4 prefix that matches {0}")]
    UnregisteredNamespace(String),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FqcnError>;
