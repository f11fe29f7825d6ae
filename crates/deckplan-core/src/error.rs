//! Error types for action runs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("discovery tool failed: {reason}")]
    Subprocess {
        reason: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("matrix output could not be parsed: {reason}")]
    MatrixParse { reason: String, raw: String },
}

/// Result type for action runs
pub type Result<T> = std::result::Result<T, ActionError>;
