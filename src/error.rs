use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VarsValidateError {
    #[error("{kind} not found: {}", .path.display())]
    InputNotFound { kind: InputKind, path: PathBuf },

    #[error("Malformed exclusion input: {0}")]
    MalformedExclusionInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which required input could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Dockerfile,
    ScanRoot,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Dockerfile => write!(f, "Dockerfile"),
            InputKind::ScanRoot => write!(f, "Terraform directory"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {message}", .path.display())]
    ReadFailed { path: PathBuf, message: String },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

pub type Result<T> = std::result::Result<T, VarsValidateError>;
