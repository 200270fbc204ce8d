//! Common error types for vcmp

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for vcmp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the comparison session and its components
#[derive(Error, Debug)]
pub enum Error {
    /// Real or fake media folder missing or not a directory
    #[error("Invalid corpus at {}: {reason}", path.display())]
    InvalidCorpus { path: PathBuf, reason: String },

    /// A trial was requested while one of the groups is empty
    #[error("No trials remaining: at least one media group is exhausted")]
    SequenceExhausted,

    /// Writing the result file failed; the session log is kept for a retry
    #[error("Failed to export results to {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    /// Submission for a trial that is not the one being presented
    #[error("No active trial with id {0}")]
    NoActiveTrial(u32),

    /// Operation attempted after the user quit
    #[error("Session is closed")]
    SessionClosed,

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_corpus(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidCorpus {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Export {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
