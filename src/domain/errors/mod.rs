// Domain errors - Error types for the domain layer

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// External tool missing or not functional
    #[error("{tool} is not installed or not functional")]
    ToolUnavailable { tool: String },

    /// Wall-clock limit exceeded, child process killed
    #[error("{operation} timed out after {}s", .timeout.as_secs())]
    ProcessTimeout { operation: String, timeout: Duration },

    /// Non-zero exit with captured diagnostic text
    #[error("{tool} failed: {diagnostic}")]
    ProcessFailure {
        tool: String,
        code: Option<i32>,
        diagnostic: String,
    },

    /// Structured output malformed or missing expected data
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Native library not found or failed to load
    #[error("Native validator unavailable: {0}")]
    NativeUnavailable(String),

    /// Failure while calling a bound native entry point
    #[error("Native call failed: {0}")]
    NativeCallFailure(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// File system failure
    #[error("File system error: {0}")]
    FsFail(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Machine-checkable tag attached to failure outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ToolUnavailable,
    ProcessTimeout,
    ProcessFailure,
    ParseError,
    NativeUnavailable,
    NativeCallFailure,
    BadArgs,
    FsFailure,
    Config,
}

impl DomainError {
    /// Tag for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ToolUnavailable { .. } => ErrorKind::ToolUnavailable,
            DomainError::ProcessTimeout { .. } => ErrorKind::ProcessTimeout,
            DomainError::ProcessFailure { .. } => ErrorKind::ProcessFailure,
            DomainError::ParseError(_) => ErrorKind::ParseError,
            DomainError::NativeUnavailable(_) => ErrorKind::NativeUnavailable,
            DomainError::NativeCallFailure(_) => ErrorKind::NativeCallFailure,
            DomainError::BadArgs(_) => ErrorKind::BadArgs,
            DomainError::FsFail(_) => ErrorKind::FsFailure,
            DomainError::Config(_) => ErrorKind::Config,
        }
    }

    /// Only timeouts are worth retrying with different parameters
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::ProcessTimeout { .. })
    }
}
