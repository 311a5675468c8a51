use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, GatewayConfig, NativeValidatorBridge, ToolAvailabilityProbe,
    TomlConfigAdapter,
};
use crate::app::{media_interactor::MediaInteractor, validation_interactor::ValidationOrchestrator};
use crate::domain::errors::DomainError;
use crate::ports::{NativeValidatorPort, ProbePort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn media_interactor(&self) -> Arc<MediaInteractor>;
    fn validation_orchestrator(&self) -> Arc<ValidationOrchestrator>;
}

/// Snapshot of the external dependencies, as reported by `doctor`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyStatus {
    pub ffmpeg: PathBuf,
    pub ffmpeg_available: bool,
    pub ffprobe: PathBuf,
    pub ffprobe_available: bool,
    pub native_enabled: bool,
    pub native_library: Option<PathBuf>,
    pub native_candidates: Vec<PathBuf>,
}

pub struct DefaultAppContainer {
    config: GatewayConfig,
    availability: Arc<ToolAvailabilityProbe>,
    native_bridge: Arc<NativeValidatorBridge>,
    media_interactor: Arc<MediaInteractor>,
    validation_orchestrator: Arc<ValidationOrchestrator>,
}

impl DefaultAppContainer {
    pub fn new(config: GatewayConfig) -> Result<Self, DomainError> {
        TomlConfigAdapter::validate(&config)?;

        let availability = Arc::new(ToolAvailabilityProbe::new(
            &config.tools.ffmpeg,
            config.timeouts.availability(),
        ));

        let probe_port = Arc::new(FFprobeAdapter::new(
            &config.tools.ffprobe,
            Arc::clone(&availability),
            config.timeouts.probe(),
        ));
        let transcode_port = Arc::new(FFmpegAdapter::new(
            &config.tools.ffmpeg,
            Arc::clone(&availability),
            config.timeouts.thumbnail(),
            config.timeouts.transcode(),
        ));
        let native_bridge = Arc::new(NativeValidatorBridge::from_settings(
            config.native.enabled,
            &config.native.library_name,
            &config.native.search_paths,
        ));

        let media_interactor = Arc::new(MediaInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&transcode_port) as Arc<dyn TranscodePort>,
        ));

        let validation_orchestrator = Arc::new(ValidationOrchestrator::new(
            Arc::clone(&native_bridge) as Arc<dyn NativeValidatorPort>,
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
        ));

        Ok(Self {
            config,
            availability,
            native_bridge,
            media_interactor,
            validation_orchestrator,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Check both tools and force the native load
    pub async fn dependency_status(&self) -> DependencyStatus {
        let ffprobe_probe = ToolAvailabilityProbe::new(
            &self.config.tools.ffprobe,
            self.config.timeouts.availability(),
        );

        DependencyStatus {
            ffmpeg: self.availability.program().to_path_buf(),
            ffmpeg_available: self.media_interactor.tools_available().await,
            ffprobe: ffprobe_probe.program().to_path_buf(),
            ffprobe_available: ffprobe_probe.is_available().await,
            native_enabled: self.native_bridge.is_enabled(),
            native_library: self.native_bridge.loaded_from().map(|p| p.to_path_buf()),
            native_candidates: self.native_bridge.candidates().to_vec(),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn media_interactor(&self) -> Arc<MediaInteractor> {
        Arc::clone(&self.media_interactor)
    }

    fn validation_orchestrator(&self) -> Arc<ValidationOrchestrator> {
        Arc::clone(&self.validation_orchestrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GatewayConfig::default();
        config.timeouts.transcode_secs = 0;
        assert!(DefaultAppContainer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_status_with_missing_tools() {
        let mut config = GatewayConfig::default();
        config.tools.ffmpeg = PathBuf::from("/nonexistent/ffmpeg");
        config.tools.ffprobe = PathBuf::from("/nonexistent/ffprobe");
        config.native.enabled = false;

        let container = DefaultAppContainer::new(config).unwrap();
        let status = container.dependency_status().await;

        assert!(!status.ffmpeg_available);
        assert!(!status.ffprobe_available);
        assert!(!status.native_enabled);
        assert!(status.native_library.is_none());
        assert!(status.native_candidates.is_empty());
    }
}
