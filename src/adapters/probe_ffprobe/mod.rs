//! FFprobe adapter for media file probing
//!
//! Runs the metadata-probe companion with JSON output and extracts the first
//! video stream together with container-level duration, size and bitrate.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::process::{ToolAvailabilityProbe, ToolCommand};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::parse_frame_rate;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeDocument {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    #[serde(default)]
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
}

// ffprobe prints these as strings; accept numbers too.
#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<Value>,
    size: Option<Value>,
    bit_rate: Option<Value>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe: PathBuf,
    availability: Arc<ToolAvailabilityProbe>,
    timeout: Duration,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(
        ffprobe: impl Into<PathBuf>,
        availability: Arc<ToolAvailabilityProbe>,
        timeout: Duration,
    ) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            availability,
            timeout,
        }
    }

    /// Command line for a metadata probe of `file_path`
    pub fn probe_command(&self, file_path: &Path) -> ToolCommand {
        ToolCommand::new(&self.ffprobe)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(file_path)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_metadata(&self, file_path: &Path) -> Result<VideoMetadata, DomainError> {
        self.availability.ensure_available().await?;

        let command = self.probe_command(file_path);
        let output = command
            .run("metadata probe", self.timeout)
            .await?
            .into_checked(&command.tool_name())?;

        parse_probe_output(&output.stdout)
    }
}

/// Extract [`VideoMetadata`] from an ffprobe JSON document
pub fn parse_probe_output(raw: &[u8]) -> Result<VideoMetadata, DomainError> {
    let document: FfprobeDocument = serde_json::from_slice(raw)
        .map_err(|e| DomainError::ParseError(format!("ffprobe output is not valid JSON: {}", e)))?;

    let stream = document
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| DomainError::ParseError("No video stream found in file".to_string()))?;

    let format = document.format.unwrap_or_default();

    let duration = number_field(format.duration.as_ref(), "duration")?.unwrap_or(UNKNOWN_DURATION);
    let size = number_field(format.size.as_ref(), "size")?.unwrap_or(0.0);
    let bitrate = number_field(format.bit_rate.as_ref(), "bit_rate")?.unwrap_or(0.0);
    let fps = parse_frame_rate(stream.r_frame_rate.as_deref().unwrap_or("0/1"))?;

    Ok(VideoMetadata {
        duration,
        size: size as u64,
        bitrate: bitrate as u64,
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        codec: stream
            .codec_name
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        fps,
    })
}

fn number_field(value: Option<&Value>, name: &str) -> Result<Option<f64>, DomainError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s == "N/A" => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(DomainError::ParseError(format!(
            "format.{} is not a non-negative number: {}",
            name,
            value.map(|v| v.to_string()).unwrap_or_default()
        ))),
    }
}
