//! Command-line argument definitions

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: vidgate.toml, then config/vidgate.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, global = true)]
    pub ffprobe: Option<PathBuf>,

    /// Native validator library, tried before the default locations
    #[arg(long, global = true)]
    pub native_lib: Option<PathBuf>,

    /// Never load the native validator
    #[arg(long, global = true)]
    pub no_native: bool,

    /// Result format on stdout
    #[arg(
        long = "output",
        id = "output_format",
        value_name = "OUTPUT",
        value_enum,
        default_value_t = OutputFormat::Json,
        global = true
    )]
    pub output: OutputFormat,
}

/// How results are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Input video file path
    pub input: PathBuf,
}

/// Arguments for the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output file path
    pub output: PathBuf,

    /// Quality preset: low, medium or high (unknown names use medium)
    #[arg(short, long, default_value = "medium")]
    pub quality: String,
}

/// Arguments for the thumbnail command
#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output image path
    pub output: PathBuf,

    /// Seek position (HH:MM:SS[.ms], MM:SS[.ms], or seconds)
    #[arg(short, long, default_value = "00:00:01")]
    pub timestamp: String,
}

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output file path
    pub output: PathBuf,

    /// Target format: webm or mp4
    #[arg(short, long, default_value = "mp4")]
    pub format: String,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Maximum story duration in seconds (default from configuration)
    #[arg(short, long)]
    pub max_duration: Option<u32>,
}

/// Arguments for the duration command
#[derive(Args, Debug)]
pub struct DurationArgs {
    /// Input video file path
    pub input: PathBuf,
}
