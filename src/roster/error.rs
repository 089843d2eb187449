use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid student number {index}: roster has {count} record(s)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt binary file: {0}")]
    Corrupt(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
