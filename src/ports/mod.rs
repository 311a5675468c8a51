// Ports - Interface definitions (contracts)

use async_trait::async_trait;
use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for structured metadata extraction
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a file and return the metadata of its first video stream
    async fn probe_metadata(&self, file_path: &Path) -> Result<VideoMetadata, DomainError>;
}

/// Port for re-encoding operations of the transcoding tool
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Whether the transcoding tool is callable
    async fn is_available(&self) -> bool;

    /// Re-encode with the named quality preset; unknown names use `medium`
    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        quality: &str,
    ) -> Result<CompressionReport, DomainError>;

    /// Extract exactly one frame at `timestamp`
    async fn extract_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        timestamp: &Timestamp,
    ) -> Result<ThumbnailReport, DomainError>;

    /// Re-encode into the container family named by `format`
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        format: &str,
    ) -> Result<ConversionReport, DomainError>;
}

/// Port for the optional in-process validator.
///
/// Calls are synchronous: they run inside the caller's task and never spawn
/// a process.
pub trait NativeValidatorPort: Send + Sync {
    /// Whether the native library is loaded. The first call performs the load.
    fn is_enabled(&self) -> bool;

    /// Duration in seconds, or [`UNKNOWN_DURATION`] on any failure
    fn duration(&self, file_path: &Path) -> f64;

    /// Story validation with the failure kept distinguishable
    fn validate_story(&self, file_path: &Path) -> Result<NativeVerdict, DomainError>;

    /// Story validation collapsed to a verdict; never fails
    fn story_verdict(&self, file_path: &Path) -> NativeVerdict {
        match self.validate_story(file_path) {
            Ok(verdict) => verdict,
            Err(DomainError::NativeUnavailable(_)) => NativeVerdict::not_loaded(),
            Err(e) => NativeVerdict::failed(e),
        }
    }
}

