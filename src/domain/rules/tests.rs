// Unit tests for business rules

use super::*;

#[test]
fn test_story_rule_within_limit() {
    assert!(StoryDurationRule::is_within(90.0, 120));
    assert!(StoryDurationRule::is_within(120.0, 120));
    assert!(StoryDurationRule::is_within(0.0, 120));
    assert!(!StoryDurationRule::is_within(150.0, 120));
    assert!(!StoryDurationRule::is_within(-1.0, 120));
    assert!(!StoryDurationRule::is_within(f64::NAN, 120));
}

#[test]
fn test_story_rule_messages() {
    assert_eq!(
        StoryDurationRule::describe(90.0, 120),
        "Video is valid (90.0s / 120s)"
    );
    assert_eq!(
        StoryDurationRule::describe(150.0, 120),
        "Video too long (150.0s / 120s max, 30.0s over)"
    );
}

#[test]
fn test_parse_frame_rate() {
    assert_eq!(parse_frame_rate("30/1").unwrap(), 30.0);
    assert_eq!(parse_frame_rate("0/1").unwrap(), 0.0);
    let ntsc = parse_frame_rate("30000/1001").unwrap();
    assert!((ntsc - 29.97).abs() < 0.01);
}

#[test]
fn test_parse_frame_rate_rejects_malformed() {
    for raw in ["30", "0/0", "30/0", "29.97/1", "abc/1", "1/x", "", "__import__('os')"] {
        let err = parse_frame_rate(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError, "input {:?}", raw);
    }
}

#[test]
fn test_compression_ratio() {
    assert_eq!(compression_ratio(1000, 250), 75.0);
    assert_eq!(compression_ratio(3, 2), 33.33);
    assert_eq!(compression_ratio(100, 150), -50.0);
    assert_eq!(compression_ratio(0, 10), 0.0);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0.0), "0:00");
    assert_eq!(format_clock(90.5), "1:30");
    assert_eq!(format_clock(3725.0), "62:05");
    assert_eq!(format_clock(-1.0), "--:--");
}
