// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod native_validator;
pub mod probe_ffprobe;
pub mod process;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use native_validator::NativeValidatorBridge;
pub use probe_ffprobe::FFprobeAdapter;
pub use process::{ToolAvailabilityProbe, ToolCommand};
pub use toml_config::{GatewayConfig, TomlConfigAdapter};
