// Validation interactor - Native-first story validation with probe fallback

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Orchestrates duration lookups across the native validator and the probe.
///
/// The native bridge is consulted first whenever it is loaded. Any native
/// failure, an unusable native duration, or a disabled bridge sends the query
/// to the metadata probe instead. Both paths end in the same
/// [`ValidationResult`] shape.
pub struct ValidationOrchestrator {
    native_port: Arc<dyn NativeValidatorPort>,
    probe_port: Arc<dyn ProbePort>,
}

impl ValidationOrchestrator {
    /// Create new orchestrator with injected ports
    pub fn new(native_port: Arc<dyn NativeValidatorPort>, probe_port: Arc<dyn ProbePort>) -> Self {
        Self {
            native_port,
            probe_port,
        }
    }

    /// Check a video against a story length limit
    pub async fn validate_for_story(&self, file_path: &Path, max_duration: u32) -> ValidationResult {
        let result = match self.native_result(file_path, max_duration) {
            Some(result) => result,
            None => self.probe_result(file_path, max_duration).await,
        };

        debug!(
            "Story validation of {} via {}: valid={} duration={:.1}",
            file_path.display(),
            result.method(),
            result.is_valid(),
            result.duration()
        );
        result
    }

    /// Duration in seconds, or [`UNKNOWN_DURATION`] when neither path can read it
    pub async fn duration(&self, file_path: &Path) -> f64 {
        if self.native_port.is_enabled() {
            let duration = self.native_port.duration(file_path);
            if is_usable_duration(duration) {
                return duration;
            }
        }

        match self.probe_port.probe_metadata(file_path).await {
            Ok(metadata) if metadata.has_duration() => metadata.duration,
            Ok(_) => UNKNOWN_DURATION,
            Err(e) => {
                debug!("Duration probe failed for {}: {}", file_path.display(), e);
                UNKNOWN_DURATION
            }
        }
    }

    /// Duration with its `M:SS` form; fails when no path can read it
    pub async fn duration_report(&self, file_path: &Path) -> Outcome<DurationReport> {
        let duration = self.duration(file_path).await;
        if !is_usable_duration(duration) {
            return Outcome::failure(&DomainError::ParseError(format!(
                "Could not read duration of {}",
                file_path.display()
            )));
        }

        Outcome::success(DurationReport {
            duration,
            duration_formatted: format_clock(duration),
        })
    }

    /// Whether the video has a positive duration no longer than `max_duration`
    pub async fn is_within_limit(&self, file_path: &Path, max_duration: u32) -> bool {
        let duration = self.duration(file_path).await;
        duration > 0.0 && StoryDurationRule::is_within(duration, max_duration)
    }

    fn native_result(&self, file_path: &Path, max_duration: u32) -> Option<ValidationResult> {
        if !self.native_port.is_enabled() {
            return None;
        }

        let verdict = match self.native_port.validate_story(file_path) {
            Ok(verdict) => verdict,
            Err(e) => {
                debug!("Native validation failed, falling back to probe: {}", e);
                return None;
            }
        };

        if !is_usable_duration(verdict.duration) {
            return None;
        }

        // The library applies its own built-in limit; judge against ours.
        let is_valid = StoryDurationRule::is_within(verdict.duration, max_duration);
        let message = if verdict.is_valid == is_valid && !verdict.message.is_empty() {
            verdict.message
        } else {
            StoryDurationRule::describe(verdict.duration, max_duration)
        };

        Some(ValidationResult::measured(
            verdict.duration,
            max_duration,
            ValidationMethod::Native,
            message,
        ))
    }

    async fn probe_result(&self, file_path: &Path, max_duration: u32) -> ValidationResult {
        let metadata = match self.probe_port.probe_metadata(file_path).await {
            Ok(metadata) if metadata.has_duration() => metadata,
            Ok(_) => return ValidationResult::unreadable(max_duration, "Could not read video duration"),
            Err(e) => {
                debug!("Metadata probe failed for {}: {}", file_path.display(), e);
                return ValidationResult::unreadable(max_duration, "Could not read video duration");
            }
        };

        ValidationResult::measured(
            metadata.duration,
            max_duration,
            ValidationMethod::ExternalTool,
            StoryDurationRule::describe(metadata.duration, max_duration),
        )
    }
}
