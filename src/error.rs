// Error types for amuse.
// Splits failures into transport, storage and validation classes so the CLI can exit distinctly.

use std::path::PathBuf;

use thiserror::Error;

use crate::kb::Tag;

#[derive(Error, Debug)]
pub enum AmuseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status: {0}")]
    UnexpectedStatus(String),

    #[error("invalid remote URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no cached dataset at {}", .0.display())]
    MissingDataset(PathBuf),

    #[error("error reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no records found with tag: {0}")]
    NoMatch(Tag),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Broad failure class, used to choose a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout or an unexpected response status.
    Transport,
    /// Local cache files missing, unreadable, unwritable or unparseable.
    Storage,
    /// Expected user-facing outcomes such as a tag with no records.
    Validation,
}

impl ErrorKind {
    /// Exit code for this class. Usage errors never get here: clap exits with 2.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Validation => 3,
            ErrorKind::Storage => 4,
            ErrorKind::Transport => 5,
        }
    }
}

impl AmuseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AmuseError::Http(_) | AmuseError::UnexpectedStatus(_) | AmuseError::InvalidUrl(_) => {
                ErrorKind::Transport
            }
            AmuseError::Io(_) | AmuseError::MissingDataset(_) | AmuseError::Csv(_) => {
                ErrorKind::Storage
            }
            AmuseError::NoMatch(_) | AmuseError::Json(_) | AmuseError::Other(_) => {
                ErrorKind::Validation
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AmuseError>;
