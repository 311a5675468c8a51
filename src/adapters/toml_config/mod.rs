// TOML config adapter - Gateway configuration from TOML files and environment

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::errors::*;
use crate::domain::model::DEFAULT_MAX_STORY_DURATION;
use crate::utils::logging::{LogFormat, LogLevel};

/// Complete gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    pub tools: ToolPaths,
    pub timeouts: Timeouts,
    pub native: NativeSettings,
    pub validation: ValidationSettings,
    pub logging: LoggingSettings,
}

/// Locations of the external tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Per-operation wall-clock budgets, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub availability_secs: u64,
    pub probe_secs: u64,
    pub thumbnail_secs: u64,
    pub transcode_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            availability_secs: 5,
            probe_secs: 30,
            thumbnail_secs: 30,
            transcode_secs: 300,
        }
    }
}

impl Timeouts {
    pub fn availability(&self) -> Duration {
        Duration::from_secs(self.availability_secs)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn thumbnail(&self) -> Duration {
        Duration::from_secs(self.thumbnail_secs)
    }

    pub fn transcode(&self) -> Duration {
        Duration::from_secs(self.transcode_secs)
    }
}

/// Native validator lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSettings {
    pub enabled: bool,
    /// Base name, without the platform suffix
    pub library_name: String,
    /// Probed before the locations relative to the executable
    pub search_paths: Vec<PathBuf>,
}

impl Default for NativeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            library_name: "video_validator".to_string(),
            search_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub max_story_duration: u32,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_story_duration: DEFAULT_MAX_STORY_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Environment variables recognized as overrides
pub const ENV_FFMPEG: &str = "VIDGATE_FFMPEG";
pub const ENV_FFPROBE: &str = "VIDGATE_FFPROBE";
pub const ENV_NATIVE_LIB: &str = "VIDGATE_NATIVE_LIB";
pub const ENV_NATIVE_ENABLED: &str = "VIDGATE_NATIVE_ENABLED";
pub const ENV_LOG_LEVEL: &str = "VIDGATE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "VIDGATE_LOG_FORMAT";
pub const ENV_MAX_STORY_DURATION: &str = "VIDGATE_MAX_STORY_DURATION";

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<GatewayConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from file
    pub fn load_file(path: &Path) -> Result<GatewayConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize config to a TOML string
    pub fn to_toml_string(config: &GatewayConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Returns the number of variables applied.
    pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup(ENV_FFMPEG) {
            config.tools.ffmpeg = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup(ENV_FFPROBE) {
            config.tools.ffprobe = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup(ENV_NATIVE_LIB) {
            config.native.search_paths.insert(0, PathBuf::from(value));
            applied += 1;
        }
        if let Some(value) = lookup(ENV_NATIVE_ENABLED) {
            config.native.enabled = parse_bool(ENV_NATIVE_ENABLED, &value)?;
            applied += 1;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = value;
            applied += 1;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            config.logging.format = LogFormat::parse(&value)?;
            applied += 1;
        }
        if let Some(value) = lookup(ENV_MAX_STORY_DURATION) {
            config.validation.max_story_duration = value.trim().parse().map_err(|e| {
                DomainError::Config(format!("Invalid {}: {}", ENV_MAX_STORY_DURATION, e))
            })?;
            applied += 1;
        }

        Ok(applied)
    }

    /// Validate configuration
    pub fn validate(config: &GatewayConfig) -> Result<(), DomainError> {
        LogLevel::parse(&config.logging.level)?;

        let timeouts = [
            ("availability_secs", config.timeouts.availability_secs),
            ("probe_secs", config.timeouts.probe_secs),
            ("thumbnail_secs", config.timeouts.thumbnail_secs),
            ("transcode_secs", config.timeouts.transcode_secs),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(DomainError::Config(format!(
                    "Timeout {} must be greater than zero",
                    name
                )));
            }
        }

        if config.native.library_name.trim().is_empty() {
            return Err(DomainError::Config(
                "Native library name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainError::Config(format!(
            "Invalid boolean value for {}: {}",
            key, other
        ))),
    }
}
