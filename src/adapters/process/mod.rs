//! Child process execution with hard wall-clock timeouts
//!
//! Every external tool invocation goes through [`ToolCommand::run`]: stdout
//! and stderr are captured, and a child that outlives its budget is killed.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::DomainError;

pub mod availability;

pub use availability::ToolAvailabilityProbe;

/// Captured result of a finished child process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub elapsed: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Diagnostic text written to stderr
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Turn a non-zero exit into [`DomainError::ProcessFailure`]
    pub fn into_checked(self, tool: &str) -> Result<Self, DomainError> {
        if self.success() {
            return Ok(self);
        }

        let stderr = self.stderr_text();
        let diagnostic = if stderr.is_empty() {
            format!("exited with {}", self.status)
        } else {
            stderr
        };

        Err(DomainError::ProcessFailure {
            tool: tool.to_string(),
            code: self.status.code(),
            diagnostic,
        })
    }
}

/// A program plus its argument list
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Short tool name used in error messages
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }

    /// Spawn, wait at most `timeout`, and capture output.
    ///
    /// A spawn failure maps to [`DomainError::ToolUnavailable`]; expiry kills
    /// the child and maps to [`DomainError::ProcessTimeout`]. The exit status
    /// is returned unchecked.
    pub async fn run(&self, operation: &str, timeout: Duration) -> Result<ProcessOutput, DomainError> {
        debug!(
            program = %self.program.display(),
            args = ?self.args,
            timeout_secs = timeout.as_secs(),
            "Spawning {}",
            operation
        );

        let started = Instant::now();
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                debug!("Failed to spawn {}: {}", self.program.display(), e);
                DomainError::ToolUnavailable {
                    tool: self.tool_name(),
                }
            })?;

        // Dropping the wait future on expiry drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ProcessOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
                elapsed: started.elapsed(),
            }),
            Ok(Err(e)) => Err(DomainError::ProcessFailure {
                tool: self.tool_name(),
                code: None,
                diagnostic: format!("failed to collect output: {}", e),
            }),
            Err(_) => {
                warn!(
                    program = %self.program.display(),
                    "{} exceeded {}s, child killed",
                    operation,
                    timeout.as_secs()
                );
                Err(DomainError::ProcessTimeout {
                    operation: operation.to_string(),
                    timeout,
                })
            }
        }
    }
}
