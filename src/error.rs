// src/error.rs
use std::fmt;

use thiserror::Error;

/// Everything that can go wrong between reading a line and the child exiting.
/// The `Display` text is what the user sees at the prompt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("memory allocation failed")]
    OutOfMemory,

    /// Buffer used before allocation or after release.
    #[error("error parsing command")]
    InvalidState,

    #[error("error parsing command: {reason}")]
    ParseFailed { reason: &'static str },

    /// Empty or whitespace-only input. Not reported.
    #[error("no command given")]
    NoCommand,

    #[error("error: commands are limited to {limit} arguments")]
    TooManyTokens { limit: usize },

    #[error("error: pipelines are not supported")]
    PipelineUnsupported,

    #[error("could not create process: {reason}")]
    SpawnFailed { code: i32, reason: String },

    #[error("{0}")]
    ExecutionFailed(Failure),
}

/// How an external command failed after it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Normal exit with a non-zero code.
    Exited(i32),
    /// Abnormal termination, with the signal when the platform reports one.
    Signaled(Option<i32>),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Exited(code) => f.write_str(&exit_code_message(*code)),
            Failure::Signaled(Some(signal)) => write!(f, "command execution failed (signal {signal})"),
            Failure::Signaled(None) => f.write_str("command execution failed"),
        }
    }
}

impl ShellError {
    /// `NoCommand` just re-prompts; everything else gets a diagnostic line.
    pub fn is_silent(&self) -> bool {
        matches!(self, ShellError::NoCommand)
    }
}

/// Pick a diagnostic for a non-zero child exit code. The well-known spawn
/// failure codes win even when a program exits with them on its own.
pub fn exit_code_message(code: i32) -> String {
    match code {
        libc::ENOENT => "command not found in PATH".to_string(),
        libc::EACCES => "permission denied".to_string(),
        libc::ENOEXEC => "exec format error".to_string(),
        _ => format!("command failed with code {code}"),
    }
}
