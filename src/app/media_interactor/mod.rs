// Media interactor - Public surface for probe and transcoding operations

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor turning gateway results into [`Outcome`] values
pub struct MediaInteractor {
    probe_port: Arc<dyn ProbePort>,
    transcode_port: Arc<dyn TranscodePort>,
}

impl MediaInteractor {
    /// Create new media interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, transcode_port: Arc<dyn TranscodePort>) -> Self {
        Self {
            probe_port,
            transcode_port,
        }
    }

    /// Metadata of the first video stream
    pub async fn video_info(&self, file_path: &Path) -> Outcome<VideoMetadata> {
        let result = self.probe_port.probe_metadata(file_path).await;
        finish("metadata probe", file_path, result)
    }

    /// Re-encode with a named quality preset
    pub async fn compress_video(
        &self,
        input: &Path,
        output: &Path,
        quality: &str,
    ) -> Outcome<CompressionReport> {
        let result = self.transcode_port.compress(input, output, quality).await;
        if let Ok(report) = &result {
            if report.preset.name() != quality.trim().to_ascii_lowercase() {
                info!(
                    "Quality '{}' is not a known preset, applied '{}'",
                    quality,
                    report.preset.name()
                );
            }
        }
        finish("compression", input, result)
    }

    /// Extract one frame at `timestamp`; malformed positions fail before any spawn
    pub async fn generate_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        timestamp: &str,
    ) -> Outcome<ThumbnailReport> {
        let result = match Timestamp::parse(timestamp) {
            Ok(timestamp) => {
                self.transcode_port
                    .extract_thumbnail(input, output, &timestamp)
                    .await
            }
            Err(e) => Err(e),
        };
        finish("thumbnail extraction", input, result)
    }

    /// Re-encode into the named container family
    pub async fn convert_format(
        &self,
        input: &Path,
        output: &Path,
        format: &str,
    ) -> Outcome<ConversionReport> {
        let result = self.transcode_port.convert(input, output, format).await;
        finish("format conversion", input, result)
    }

    /// Whether the transcoding tool can be run right now
    pub async fn tools_available(&self) -> bool {
        self.transcode_port.is_available().await
    }
}

fn finish<T>(operation: &str, file_path: &Path, result: Result<T, DomainError>) -> Outcome<T> {
    match &result {
        Ok(_) => info!("{} of {} succeeded", operation, file_path.display()),
        Err(e) if e.is_retryable() => warn!("{} of {} timed out: {}", operation, file_path.display(), e),
        Err(e) => warn!("{} of {} failed: {}", operation, file_path.display(), e),
    }
    Outcome::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeProbe(Result<VideoMetadata, DomainError>);

    #[async_trait]
    impl ProbePort for FakeProbe {
        async fn probe_metadata(&self, _file_path: &Path) -> Result<VideoMetadata, DomainError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingTranscoder {
        calls: Mutex<Vec<String>>,
        fail_with: Option<DomainError>,
    }

    impl RecordingTranscoder {
        fn failing(error: DomainError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(error),
            }
        }

        fn record(&self, call: String) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl TranscodePort for RecordingTranscoder {
        async fn is_available(&self) -> bool {
            self.fail_with.is_none()
        }

        async fn compress(
            &self,
            _input: &Path,
            output: &Path,
            quality: &str,
        ) -> Result<CompressionReport, DomainError> {
            self.record(format!("compress {}", quality))?;
            Ok(CompressionReport {
                output_path: output.display().to_string(),
                original_size: 1000,
                compressed_size: 400,
                compression_ratio: 60.0,
                quality: quality.to_string(),
                preset: Quality::resolve(quality),
            })
        }

        async fn extract_thumbnail(
            &self,
            _input: &Path,
            output: &Path,
            timestamp: &Timestamp,
        ) -> Result<ThumbnailReport, DomainError> {
            self.record(format!("thumbnail {}", timestamp))?;
            Ok(ThumbnailReport {
                thumbnail_path: output.display().to_string(),
                timestamp: timestamp.to_string(),
            })
        }

        async fn convert(
            &self,
            _input: &Path,
            output: &Path,
            format: &str,
        ) -> Result<ConversionReport, DomainError> {
            self.record(format!("convert {}", format))?;
            Ok(ConversionReport {
                output_path: output.display().to_string(),
                format: format.to_string(),
            })
        }
    }

    fn metadata(duration: f64) -> VideoMetadata {
        VideoMetadata {
            duration,
            size: 2048,
            bitrate: 64_000,
            width: 720,
            height: 1280,
            codec: "h264".to_string(),
            fps: 25.0,
        }
    }

    fn interactor(
        probe: Result<VideoMetadata, DomainError>,
        transcoder: Arc<RecordingTranscoder>,
    ) -> MediaInteractor {
        MediaInteractor::new(Arc::new(FakeProbe(probe)), transcoder)
    }

    #[tokio::test]
    async fn test_video_info_success() {
        let outcome = interactor(Ok(metadata(12.0)), Arc::default())
            .video_info(Path::new("a.mp4"))
            .await;
        assert!(outcome.success);
        assert_eq!(outcome.data.unwrap().codec, "h264");
    }

    #[tokio::test]
    async fn test_video_info_failure_carries_kind() {
        let error = DomainError::ParseError("No video stream found in file".to_string());
        let outcome = interactor(Err(error), Arc::default())
            .video_info(Path::new("song.mp3"))
            .await;
        assert!(!outcome.success);
        assert!(outcome.data.is_none());
        assert_eq!(outcome.kind, Some(ErrorKind::ParseError));
        assert_eq!(
            outcome.error.as_deref(),
            Some("Parse error: No video stream found in file")
        );
    }

    #[tokio::test]
    async fn test_compress_reports_applied_preset() {
        let outcome = interactor(Ok(metadata(1.0)), Arc::default())
            .compress_video(Path::new("in.mov"), Path::new("out.mp4"), "ultra")
            .await;
        let report = outcome.data.unwrap();
        assert_eq!(report.quality, "ultra");
        assert_eq!(report.preset, Quality::Medium);
    }

    #[tokio::test]
    async fn test_timeout_outcome_is_retryable() {
        let transcoder = Arc::new(RecordingTranscoder::failing(DomainError::ProcessTimeout {
            operation: "video compression".to_string(),
            timeout: Duration::from_secs(300),
        }));
        let outcome = interactor(Ok(metadata(1.0)), transcoder)
            .compress_video(Path::new("in.mov"), Path::new("out.mp4"), "high")
            .await;
        assert!(!outcome.success);
        assert!(outcome.is_retryable());
        assert_eq!(outcome.kind, Some(ErrorKind::ProcessTimeout));
    }

    #[tokio::test]
    async fn test_process_failure_is_not_retryable() {
        let transcoder = Arc::new(RecordingTranscoder::failing(DomainError::ProcessFailure {
            tool: "ffmpeg".to_string(),
            code: Some(1),
            diagnostic: "Invalid data found when processing input".to_string(),
        }));
        let outcome = interactor(Ok(metadata(1.0)), transcoder)
            .convert_format(Path::new("in.mov"), Path::new("out.webm"), "webm")
            .await;
        assert!(!outcome.success);
        assert!(!outcome.is_retryable());
        assert!(outcome.data.is_none());
    }

    #[tokio::test]
    async fn test_bad_timestamp_never_reaches_transcoder() {
        let transcoder = Arc::new(RecordingTranscoder::default());
        let outcome = interactor(Ok(metadata(1.0)), transcoder.clone())
            .generate_thumbnail(Path::new("in.mp4"), Path::new("t.jpg"), "00:99:00")
            .await;
        assert!(!outcome.success);
        assert_eq!(outcome.kind, Some(ErrorKind::BadArgs));
        assert!(transcoder.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tools_available_reflects_transcoder() {
        let healthy = interactor(Ok(metadata(1.0)), Arc::default());
        assert!(healthy.tools_available().await);

        let broken = interactor(
            Ok(metadata(1.0)),
            Arc::new(RecordingTranscoder::failing(DomainError::ToolUnavailable {
                tool: "ffmpeg".to_string(),
            })),
        );
        assert!(!broken.tools_available().await);
    }

    #[tokio::test]
    async fn test_thumbnail_passes_timestamp_text() {
        let transcoder = Arc::new(RecordingTranscoder::default());
        let outcome = interactor(Ok(metadata(1.0)), transcoder.clone())
            .generate_thumbnail(Path::new("in.mp4"), Path::new("t.jpg"), "00:00:03.5")
            .await;
        assert_eq!(outcome.data.unwrap().timestamp, "00:00:03.5");
        assert_eq!(*transcoder.calls.lock().unwrap(), vec!["thumbnail 00:00:03.5"]);
    }
}
