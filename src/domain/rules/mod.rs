// Domain rules - Business logic and policies

use crate::domain::errors::*;
use crate::domain::model::is_usable_duration;

/// Story length policy
pub struct StoryDurationRule;

impl StoryDurationRule {
    /// A duration passes when it is readable and no longer than the limit.
    pub fn is_within(duration: f64, max_duration: u32) -> bool {
        is_usable_duration(duration) && duration <= max_duration as f64
    }

    /// Human-readable verdict, stating the overage when too long
    pub fn describe(duration: f64, max_duration: u32) -> String {
        if Self::is_within(duration, max_duration) {
            format!("Video is valid ({:.1}s / {}s)", duration, max_duration)
        } else {
            format!(
                "Video too long ({:.1}s / {}s max, {:.1}s over)",
                duration,
                max_duration,
                duration - max_duration as f64
            )
        }
    }
}

/// Evaluate an `N/D` frame rate as reported by the probe.
///
/// Only `integer/integer` with a non-zero denominator is accepted.
pub fn parse_frame_rate(raw: &str) -> Result<f64, DomainError> {
    let (num, den) = raw
        .trim()
        .split_once('/')
        .ok_or_else(|| DomainError::ParseError(format!("Unexpected frame rate format: '{}'", raw)))?;

    let num: i64 = num.trim().parse().map_err(|_| {
        DomainError::ParseError(format!("Frame rate numerator '{}' from '{}' is not an integer", num, raw))
    })?;
    let den: i64 = den.trim().parse().map_err(|_| {
        DomainError::ParseError(format!("Frame rate denominator '{}' from '{}' is not an integer", den, raw))
    })?;

    if den == 0 {
        return Err(DomainError::ParseError(format!(
            "Frame rate '{}' has a zero denominator",
            raw
        )));
    }

    Ok(num as f64 / den as f64)
}

/// Space saved by compression, as a percentage rounded to 2 decimals.
///
/// Defined as 0.0 for an empty original.
pub fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let ratio = (1.0 - compressed_size as f64 / original_size as f64) * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// Format seconds as `M:SS`
pub fn format_clock(seconds: f64) -> String {
    if !is_usable_duration(seconds) {
        return "--:--".to_string();
    }
    let whole = seconds as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests;
