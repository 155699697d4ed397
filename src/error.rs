//! Error types for ansible-bench.
//!
//! This module defines the error types used throughout ansible-bench. The
//! central kind is [`Error::ProcessFailed`]: every external command that exits
//! non-zero surfaces as this variant and aborts the run.

use thiserror::Error;

/// Result type alias for ansible-bench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ansible-bench.
#[derive(Error, Debug)]
pub enum Error {
    /// An external command exited with a non-zero status. The captured
    /// stdout/stderr have already been logged at the raise site.
    #[error("Command '{command}' exited with status {code}")]
    ProcessFailed {
        /// The full command line that was invoked
        command: String,
        /// Exit code reported by the process (-1 if killed by a signal)
        code: i32,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The version matrix has no interpreter entries.
    #[error("Version matrix is empty")]
    EmptyMatrix,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new process failure error.
    pub fn process_failed(
        command: impl Into<String>,
        code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ProcessFailed {
            command: command.into(),
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ProcessFailed { .. } => 2,
            Error::Config(_) | Error::TomlParse(_) | Error::EmptyMatrix => 4,
            _ => 1,
        }
    }
}
