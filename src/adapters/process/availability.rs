// Tool availability probe - Checks that the transcoding tool is callable

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::ToolCommand;
use crate::domain::errors::DomainError;

/// Runs `<tool> -version` under a short timeout
#[derive(Debug, Clone)]
pub struct ToolAvailabilityProbe {
    program: PathBuf,
    timeout: Duration,
}

impl ToolAvailabilityProbe {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// False on spawn failure, timeout, or non-zero exit
    pub async fn is_available(&self) -> bool {
        let command = ToolCommand::new(&self.program).arg("-version");
        match command.run("availability check", self.timeout).await {
            Ok(output) => output.success(),
            Err(e) => {
                debug!("{} unavailable: {}", self.program.display(), e);
                false
            }
        }
    }

    /// [`DomainError::ToolUnavailable`] unless the tool answers
    pub async fn ensure_available(&self) -> Result<(), DomainError> {
        if self.is_available().await {
            Ok(())
        } else {
            Err(DomainError::ToolUnavailable {
                tool: ToolCommand::new(&self.program).tool_name(),
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tool_is_unavailable() {
        let probe = ToolAvailabilityProbe::new("/nonexistent/ffmpeg", Duration::from_secs(5));
        assert!(!probe.is_available().await);
        assert!(probe.ensure_available().await.is_err());
    }

    #[tokio::test]
    async fn test_failing_tool_is_unavailable() {
        // `false` ignores its arguments and exits 1
        let probe = ToolAvailabilityProbe::new("false", Duration::from_secs(5));
        assert!(!probe.is_available().await);
    }

    #[tokio::test]
    async fn test_answering_tool_is_available() {
        let probe = ToolAvailabilityProbe::new("true", Duration::from_secs(5));
        assert!(probe.is_available().await);
    }
}
