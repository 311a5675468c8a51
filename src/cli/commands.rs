//! Command implementations
//!
//! Each command runs one public operation, prints its result value on stdout
//! and reports whether the outcome was a success.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::*;
use crate::utils::format_file_size;

/// Execute the info command
pub async fn info(container: &DefaultAppContainer, args: InfoArgs, format: OutputFormat) -> Result<bool> {
    let outcome = container.media_interactor().video_info(&args.input).await;
    emit(&outcome, format)?;
    Ok(outcome.success)
}

/// Execute the compress command
pub async fn compress(
    container: &DefaultAppContainer,
    args: CompressArgs,
    format: OutputFormat,
) -> Result<bool> {
    let outcome = container
        .media_interactor()
        .compress_video(&args.input, &args.output, &args.quality)
        .await;
    emit(&outcome, format)?;
    Ok(outcome.success)
}

/// Execute the thumbnail command
pub async fn thumbnail(
    container: &DefaultAppContainer,
    args: ThumbnailArgs,
    format: OutputFormat,
) -> Result<bool> {
    let outcome = container
        .media_interactor()
        .generate_thumbnail(&args.input, &args.output, &args.timestamp)
        .await;
    emit(&outcome, format)?;
    Ok(outcome.success)
}

/// Execute the convert command
pub async fn convert(
    container: &DefaultAppContainer,
    args: ConvertArgs,
    format: OutputFormat,
) -> Result<bool> {
    let outcome = container
        .media_interactor()
        .convert_format(&args.input, &args.output, &args.format)
        .await;
    emit(&outcome, format)?;
    Ok(outcome.success)
}

/// Execute the validate command; an over-long video is a failure
pub async fn validate(
    container: &DefaultAppContainer,
    args: ValidateArgs,
    format: OutputFormat,
) -> Result<bool> {
    let max_duration = args
        .max_duration
        .unwrap_or(container.config().validation.max_story_duration);

    let result = container
        .validation_orchestrator()
        .validate_for_story(&args.input, max_duration)
        .await;

    info!("{}", result.message());
    emit(&result, format)?;
    Ok(result.is_valid())
}

/// Execute the duration command
pub async fn duration(
    container: &DefaultAppContainer,
    args: DurationArgs,
    format: OutputFormat,
) -> Result<bool> {
    let outcome = container
        .validation_orchestrator()
        .duration_report(&args.input)
        .await;
    emit(&outcome, format)?;
    Ok(outcome.success)
}

/// Execute the doctor command; fails when ffmpeg cannot run
pub async fn doctor(container: &DefaultAppContainer, format: OutputFormat) -> Result<bool> {
    let status = container.dependency_status().await;
    emit(&status, format)?;
    Ok(status.ffmpeg_available && status.ffprobe_available)
}

fn emit<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render a result value in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Failed to serialize result to YAML")
        }
        OutputFormat::Text => {
            let value = serde_json::to_value(value).context("Failed to serialize result")?;
            Ok(render_text(&value))
        }
    }
}

/// One `key: value` line per field; byte counts are shown human-readable
fn render_text(value: &Value) -> String {
    let Value::Object(fields) = value else {
        return text_scalar(value);
    };

    fields
        .iter()
        .map(|(key, field)| match field {
            Value::Number(n) if key.ends_with("size") => match n.as_u64() {
                Some(bytes) => format!("{}: {}", key, format_file_size(bytes)),
                None => format!("{}: {}", key, n),
            },
            _ => format!("{}: {}", key, text_scalar(field)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(text_scalar).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
