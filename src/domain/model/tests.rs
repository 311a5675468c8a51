// Unit tests for domain models

use super::*;

#[test]
fn test_measured_result_within_limit() {
    let result = ValidationResult::measured(90.0, 120, ValidationMethod::ExternalTool, "ok");
    assert!(result.is_valid());
    assert_eq!(result.duration(), 90.0);
    assert_eq!(result.max_duration(), 120);
    assert_eq!(result.method(), ValidationMethod::ExternalTool);
}

#[test]
fn test_measured_result_over_limit() {
    let result = ValidationResult::measured(150.0, 120, ValidationMethod::Native, "too long");
    assert!(!result.is_valid());
    assert_eq!(result.duration(), 150.0);
    assert_eq!(result.method(), ValidationMethod::Native);
}

#[test]
fn test_unusable_duration_becomes_error() {
    for duration in [-1.0, f64::NAN, f64::INFINITY] {
        let result = ValidationResult::measured(duration, 120, ValidationMethod::Native, "?");
        assert_eq!(result.method(), ValidationMethod::Error);
        assert_eq!(result.duration(), UNKNOWN_DURATION);
        assert!(!result.is_valid());
    }
}

#[test]
fn test_error_method_forces_sentinel() {
    let result = ValidationResult::measured(10.0, 120, ValidationMethod::Error, "?");
    assert_eq!(result.duration(), UNKNOWN_DURATION);
    assert!(!result.is_valid());
}

#[test]
fn test_validation_result_serialization() {
    let result = ValidationResult::measured(90.0, 120, ValidationMethod::ExternalTool, "ok");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["method"], "external-tool");
    assert_eq!(json["is_valid"], true);
    assert_eq!(json["max_duration"], 120);

    let error = ValidationResult::unreadable(120, "Could not read video duration");
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["method"], "error");
    assert_eq!(json["duration"], -1.0);
}

#[test]
fn test_quality_resolution() {
    assert_eq!(Quality::resolve("low"), Quality::Low);
    assert_eq!(Quality::resolve("HIGH"), Quality::High);
    assert_eq!(Quality::resolve("medium"), Quality::Medium);
    assert_eq!(Quality::resolve("ultra"), Quality::Medium);
    assert_eq!(Quality::resolve(""), Quality::Medium);
}

#[test]
fn test_quality_presets() {
    assert_eq!(Quality::Low.preset(), QualityPreset { crf: 28, speed: "fast" });
    assert_eq!(Quality::Medium.preset(), QualityPreset { crf: 23, speed: "medium" });
    assert_eq!(Quality::High.preset(), QualityPreset { crf: 18, speed: "slow" });
}

#[test]
fn test_target_format() {
    assert_eq!(TargetFormat::from_name("webm"), TargetFormat::Webm);
    assert_eq!(TargetFormat::from_name("WebM"), TargetFormat::Webm);
    assert_eq!(TargetFormat::from_name("mp4"), TargetFormat::Mp4);
    assert_eq!(TargetFormat::from_name("mov"), TargetFormat::Mp4);
}

#[test]
fn test_timestamp_parse() {
    assert_eq!(Timestamp::parse("00:00:01").unwrap().seconds(), 1.0);
    assert_eq!(Timestamp::parse("01:02:03.5").unwrap().seconds(), 3723.5);
    assert_eq!(Timestamp::parse("02:30").unwrap().seconds(), 150.0);
    assert_eq!(Timestamp::parse("12.5").unwrap().seconds(), 12.5);
    assert_eq!(Timestamp::parse(" 00:00:05 ").unwrap().as_str(), "00:00:05");
}

#[test]
fn test_timestamp_parse_invalid() {
    let malformed = [
        "", "abc", "00:60:00", "00:00:60", "-5", "1:2:3:4", "00:-1:00", "1:-5", "01:00:-5",
        "1:NaN",
    ];
    for raw in malformed {
        let err = Timestamp::parse(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadArgs, "input {:?}", raw);
    }
}

#[test]
fn test_outcome_serialization() {
    let ok = Outcome::success(ThumbnailReport {
        thumbnail_path: "/tmp/t.jpg".to_string(),
        timestamp: "00:00:01".to_string(),
    });
    let json = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["thumbnail_path"], "/tmp/t.jpg");
    assert!(json.get("error").is_none());

    let err: Outcome<ThumbnailReport> = Outcome::failure(&DomainError::ToolUnavailable {
        tool: "ffmpeg".to_string(),
    });
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["kind"], "tool_unavailable");
    assert!(json.get("thumbnail_path").is_none());
}

#[test]
fn test_native_verdict_shapes() {
    let verdict = NativeVerdict::not_loaded();
    assert!(!verdict.is_valid);
    assert_eq!(verdict.duration, UNKNOWN_DURATION);
    assert_eq!(verdict.message, "native library not loaded");

    let verdict = NativeVerdict::failed("boom");
    assert_eq!(verdict.message, "Error: boom");
}
