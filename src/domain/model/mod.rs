// Domain models - Core types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, ErrorKind};
use crate::domain::rules::StoryDurationRule;

/// Sentinel for a duration that could not be read
pub const UNKNOWN_DURATION: f64 = -1.0;

/// Default story length limit in seconds
pub const DEFAULT_MAX_STORY_DURATION: u32 = 120;

/// Metadata extracted from a single probe of a video file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Container duration in seconds, or [`UNKNOWN_DURATION`]
    pub duration: f64,
    /// Container size in bytes
    pub size: u64,
    /// Overall bitrate in bits per second
    pub bitrate: u64,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    /// Frames per second, evaluated from the stream's `N/D` rate
    pub fps: f64,
}

impl VideoMetadata {
    /// Whether the probe produced a usable duration
    pub fn has_duration(&self) -> bool {
        is_usable_duration(self.duration)
    }
}

/// A duration is usable when it is finite and non-negative.
pub fn is_usable_duration(duration: f64) -> bool {
    duration.is_finite() && duration >= 0.0
}

/// Which path produced a validation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMethod {
    Native,
    ExternalTool,
    Error,
}

impl fmt::Display for ValidationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMethod::Native => write!(f, "native"),
            ValidationMethod::ExternalTool => write!(f, "external-tool"),
            ValidationMethod::Error => write!(f, "error"),
        }
    }
}

/// Story validation verdict.
///
/// Only constructible through [`ValidationResult::measured`] and
/// [`ValidationResult::unreadable`], which keep `is_valid` consistent with
/// `duration` and `max_duration`, and force `method = error` results to carry
/// the unknown-duration sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    duration: f64,
    max_duration: u32,
    message: String,
    method: ValidationMethod,
}

impl ValidationResult {
    /// Verdict for a measured duration.
    ///
    /// An unusable duration yields an `error` result regardless of the
    /// requested method.
    pub fn measured(
        duration: f64,
        max_duration: u32,
        method: ValidationMethod,
        message: impl Into<String>,
    ) -> Self {
        if !is_usable_duration(duration) || method == ValidationMethod::Error {
            return Self::unreadable(max_duration, "Could not read video duration");
        }

        Self {
            is_valid: StoryDurationRule::is_within(duration, max_duration),
            duration,
            max_duration,
            message: message.into(),
            method,
        }
    }

    /// Verdict when no duration could be read
    pub fn unreadable(max_duration: u32, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            duration: UNKNOWN_DURATION,
            max_duration,
            message: message.into(),
            method: ValidationMethod::Error,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn max_duration(&self) -> u32 {
        self.max_duration
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn method(&self) -> ValidationMethod {
        self.method
    }
}

/// Result shape produced by the native validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeVerdict {
    pub is_valid: bool,
    pub duration: f64,
    pub message: String,
}

impl NativeVerdict {
    /// Verdict reported while the native library is not loaded
    pub fn not_loaded() -> Self {
        Self {
            is_valid: false,
            duration: UNKNOWN_DURATION,
            message: "native library not loaded".to_string(),
        }
    }

    /// Verdict reported when a native call failed
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            is_valid: false,
            duration: UNKNOWN_DURATION,
            message: format!("Error: {}", reason),
        }
    }
}

/// Named quality level for compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

/// Encoder parameters bound to a quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityPreset {
    /// Constant rate factor passed to `-crf`
    pub crf: u8,
    /// Speed/efficiency trade-off passed to `-preset`
    pub speed: &'static str,
}

impl Quality {
    /// Resolve a quality name; unrecognized names fall back to `medium`.
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => Quality::Low,
            "high" => Quality::High,
            _ => Quality::Medium,
        }
    }

    pub fn preset(self) -> QualityPreset {
        match self {
            Quality::Low => QualityPreset { crf: 28, speed: "fast" },
            Quality::Medium => QualityPreset { crf: 23, speed: "medium" },
            Quality::High => QualityPreset { crf: 18, speed: "slow" },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::Medium
    }
}

/// Container family targeted by a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// H.264/AAC with progressive playback
    Mp4,
    /// VP9/Opus, constant quality
    Webm,
}

impl TargetFormat {
    /// Anything other than `webm` is treated as the general-purpose container.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("webm") {
            TargetFormat::Webm
        } else {
            TargetFormat::Mp4
        }
    }
}

/// Seek position for thumbnail extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    text: String,
    seconds: f64,
}

impl Timestamp {
    /// Parse `HH:MM:SS[.fff]`, `MM:SS[.fff]` or plain seconds.
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();
        let invalid = || {
            DomainError::BadArgs(format!(
                "Invalid timestamp '{}'. Expected HH:MM:SS, MM:SS or seconds",
                time_str
            ))
        };

        let parts: Vec<&str> = trimmed.split(':').collect();
        let seconds = match parts.as_slice() {
            [secs] => secs.parse::<f64>().map_err(|_| invalid())?,
            [mins, secs] => {
                let minutes = mins.parse::<u32>().map_err(|_| invalid())?;
                let seconds = secs.parse::<f64>().map_err(|_| invalid())?;
                if !(0.0..60.0).contains(&seconds) {
                    return Err(invalid());
                }
                minutes as f64 * 60.0 + seconds
            }
            [hours, mins, secs] => {
                let hours = hours.parse::<u32>().map_err(|_| invalid())?;
                let minutes = mins.parse::<u32>().map_err(|_| invalid())?;
                let seconds = secs.parse::<f64>().map_err(|_| invalid())?;
                if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
                    return Err(invalid());
                }
                hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds
            }
            _ => return Err(invalid()),
        };

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            text: trimmed.to_string(),
            seconds,
        })
    }

    /// Text handed to the transcoding tool
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self {
            text: "00:00:01".to_string(),
            seconds: 1.0,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Successful compression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    pub output_path: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percentage saved, rounded to 2 decimals
    pub compression_ratio: f64,
    /// Quality name as requested
    pub quality: String,
    /// Preset actually applied
    pub preset: Quality,
}

/// Successful thumbnail extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailReport {
    pub thumbnail_path: String,
    pub timestamp: String,
}

/// Successful format conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub output_path: String,
    /// Format name as requested
    pub format: String,
}

/// Duration lookup with a display form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    pub duration: f64,
    /// `M:SS`
    pub duration_formatted: String,
}

/// Success/failure value returned across the public boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn failure(error: &DomainError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }

    /// Whether a retry with different parameters may succeed
    pub fn is_retryable(&self) -> bool {
        self.kind == Some(ErrorKind::ProcessTimeout)
    }
}

impl<T> From<Result<T, DomainError>> for Outcome<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(e) => Outcome::failure(&e),
        }
    }
}

#[cfg(test)]
mod tests;
