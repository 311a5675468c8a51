//! FFmpeg execution adapter
//!
//! Compression, thumbnail extraction and format conversion, each as one
//! child process with its own timeout. The availability probe runs before
//! every operation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::adapters::process::{ToolAvailabilityProbe, ToolCommand};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::compression_ratio;
use crate::ports::*;

/// Audio settings shared by the H.264 outputs
const AAC_BITRATE: &str = "128k";
/// JPEG quality scale for thumbnails, 2 being near-best
const THUMBNAIL_QUALITY: &str = "2";
const VP9_CRF: &str = "30";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg: PathBuf,
    availability: Arc<ToolAvailabilityProbe>,
    thumbnail_timeout: Duration,
    transcode_timeout: Duration,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(
        ffmpeg: impl Into<PathBuf>,
        availability: Arc<ToolAvailabilityProbe>,
        thumbnail_timeout: Duration,
        transcode_timeout: Duration,
    ) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            availability,
            thumbnail_timeout,
            transcode_timeout,
        }
    }

    /// H.264/AAC re-encode with progressive playback enabled
    pub fn compress_command(&self, input: &Path, output: &Path, quality: Quality) -> ToolCommand {
        let preset = quality.preset();
        ToolCommand::new(&self.ffmpeg)
            .arg("-i")
            .arg(input)
            .args(["-c:v", "libx264", "-crf"])
            .arg(preset.crf.to_string())
            .args(["-preset", preset.speed])
            .args(["-c:a", "aac", "-b:a", AAC_BITRATE])
            .args(["-movflags", "+faststart", "-y"])
            .arg(output)
    }

    /// Single-frame extraction at `timestamp`
    pub fn thumbnail_command(&self, input: &Path, output: &Path, timestamp: &Timestamp) -> ToolCommand {
        ToolCommand::new(&self.ffmpeg)
            .arg("-i")
            .arg(input)
            .args(["-ss", timestamp.as_str()])
            .args(["-vframes", "1", "-q:v", THUMBNAIL_QUALITY, "-y"])
            .arg(output)
    }

    /// Codec selection per target container
    pub fn convert_command(&self, input: &Path, output: &Path, format: TargetFormat) -> ToolCommand {
        let command = ToolCommand::new(&self.ffmpeg).arg("-i").arg(input);
        let command = match format {
            TargetFormat::Webm => command.args([
                "-c:v", "libvpx-vp9", "-crf", VP9_CRF, "-b:v", "0", "-c:a", "libopus",
            ]),
            TargetFormat::Mp4 => command.args([
                "-c:v", "libx264", "-c:a", "aac", "-movflags", "+faststart",
            ]),
        };
        command.arg("-y").arg(output)
    }

    async fn execute(
        &self,
        command: ToolCommand,
        operation: &str,
        timeout: Duration,
    ) -> Result<(), DomainError> {
        self.availability.ensure_available().await?;

        let output = command
            .run(operation, timeout)
            .await?
            .into_checked(&command.tool_name())?;

        info!(
            "{} finished in {:.1}s",
            operation,
            output.elapsed.as_secs_f64()
        );
        Ok(())
    }
}

async fn file_size(path: &Path) -> Result<u64, DomainError> {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.len())
        .map_err(|e| DomainError::FsFail(format!("Failed to stat {}: {}", path.display(), e)))
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn is_available(&self) -> bool {
        self.availability.is_available().await
    }

    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        quality: &str,
    ) -> Result<CompressionReport, DomainError> {
        let preset = Quality::resolve(quality);
        let command = self.compress_command(input, output, preset);
        self.execute(command, "video compression", self.transcode_timeout)
            .await?;

        let original_size = file_size(input).await?;
        let compressed_size = file_size(output).await?;

        Ok(CompressionReport {
            output_path: output.to_string_lossy().into_owned(),
            original_size,
            compressed_size,
            compression_ratio: compression_ratio(original_size, compressed_size),
            quality: quality.to_string(),
            preset,
        })
    }

    async fn extract_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        timestamp: &Timestamp,
    ) -> Result<ThumbnailReport, DomainError> {
        let command = self.thumbnail_command(input, output, timestamp);
        self.execute(command, "thumbnail extraction", self.thumbnail_timeout)
            .await?;

        Ok(ThumbnailReport {
            thumbnail_path: output.to_string_lossy().into_owned(),
            timestamp: timestamp.to_string(),
        })
    }

    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        format: &str,
    ) -> Result<ConversionReport, DomainError> {
        let target = TargetFormat::from_name(format);
        let command = self.convert_command(input, output, target);
        self.execute(command, "format conversion", self.transcode_timeout)
            .await?;

        Ok(ConversionReport {
            output_path: output.to_string_lossy().into_owned(),
            format: format.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> FFmpegAdapter {
        FFmpegAdapter::new(
            "ffmpeg",
            Arc::new(ToolAvailabilityProbe::new("ffmpeg", Duration::from_secs(5))),
            Duration::from_secs(30),
            Duration::from_secs(300),
        )
    }

    fn args(command: &ToolCommand) -> Vec<String> {
        command
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_compress_command_grammar() {
        let command = adapter().compress_command(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            Quality::High,
        );
        assert_eq!(
            args(&command),
            [
                "-i", "in.mov", "-c:v", "libx264", "-crf", "18", "-preset", "slow", "-c:a",
                "aac", "-b:a", "128k", "-movflags", "+faststart", "-y", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_unknown_quality_matches_medium_command() {
        let adapter = adapter();
        let unknown = adapter.compress_command(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            Quality::resolve("ultra"),
        );
        let medium = adapter.compress_command(
            Path::new("in.mov"),
            Path::new("out.mp4"),
            Quality::Medium,
        );
        assert_eq!(unknown, medium);
    }

    #[test]
    fn test_thumbnail_command_grammar() {
        let timestamp = Timestamp::parse("00:00:03").unwrap();
        let command = adapter().thumbnail_command(
            Path::new("in.mp4"),
            Path::new("thumb.jpg"),
            &timestamp,
        );
        assert_eq!(
            args(&command),
            ["-i", "in.mp4", "-ss", "00:00:03", "-vframes", "1", "-q:v", "2", "-y", "thumb.jpg"]
        );
    }

    #[test]
    fn test_convert_command_per_format() {
        let adapter = adapter();
        let webm = adapter.convert_command(Path::new("in.mp4"), Path::new("out.webm"), TargetFormat::Webm);
        assert_eq!(
            args(&webm),
            [
                "-i", "in.mp4", "-c:v", "libvpx-vp9", "-crf", "30", "-b:v", "0", "-c:a",
                "libopus", "-y", "out.webm"
            ]
        );

        let mp4 = adapter.convert_command(Path::new("in.webm"), Path::new("out.mp4"), TargetFormat::Mp4);
        assert_eq!(
            args(&mp4),
            [
                "-i", "in.webm", "-c:v", "libx264", "-c:a", "aac", "-movflags", "+faststart",
                "-y", "out.mp4"
            ]
        );
    }
}
