// Unit tests for business rules

use super::*;

#[test]
fn test_validator_accepts_video_within_limit() {
    assert_eq!(FileValidator::validate("video/mp4", 10), Validation::Accepted);
    assert_eq!(
        FileValidator::validate("video/quicktime", MAX_UPLOAD_BYTES),
        Validation::Accepted
    );
}

#[test]
fn test_validator_rejects_non_video() {
    for mime in ["image/png", "audio/mpeg", "application/octet-stream", "", "Video/mp4"] {
        assert_eq!(
            FileValidator::validate(mime, 1024),
            Validation::Rejected(Rejection::NotAVideo),
            "{}",
            mime
        );
    }
}

#[test]
fn test_validator_rejects_oversized() {
    assert_eq!(
        FileValidator::validate("video/webm", MAX_UPLOAD_BYTES + 1),
        Validation::Rejected(Rejection::TooLarge)
    );
}

#[test]
fn test_validator_type_rule_wins() {
    assert_eq!(
        FileValidator::validate("text/plain", MAX_UPLOAD_BYTES * 2),
        Validation::Rejected(Rejection::NotAVideo)
    );
}

#[test]
fn test_rejection_messages() {
    assert_eq!(Rejection::NotAVideo.to_string(), "not a video file");
    assert_eq!(Rejection::TooLarge.to_string(), "file too large, max 500MB");
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(1), "1 Bytes");
    assert_eq!(format_file_size(1023), "1023 Bytes");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1_048_576), "1 MB");
    assert_eq!(format_file_size(5_452_595), "5.2 MB");
    assert_eq!(format_file_size(1_073_741_824), "1 GB");
    assert_eq!(format_file_size(10 * 1_073_741_824), "10 GB");
}

#[test]
fn test_format_file_size_rounds_ties_up() {
    assert_eq!(format_file_size(1152), "1.13 KB");
    assert_eq!(format_file_size(1_179_648), "1.13 MB");
    assert_eq!(format_file_size(1_126_400), "1.07 MB");
}

#[test]
fn test_format_file_size_caps_at_gigabytes() {
    assert_eq!(format_file_size(2048 * 1_073_741_824), "2048 GB");
}

#[test]
fn test_format_display_name() {
    assert_eq!(format_display_name("1x1"), "1:1 (1080×1080)");
    assert_eq!(format_display_name("9x16"), "9:16 (1080×1920)");
    assert_eq!(format_display_name("16x9"), "16:9 (1920×1080)");
    assert_eq!(format_display_name("4x5"), "4:5 (1080×1350)");
    assert_eq!(format_display_name("1x2"), "1:2 (1080×2160)");
    assert_eq!(format_display_name("2x1"), "2:1 (2160×1080)");
    assert_eq!(format_display_name("21x9"), "21:9 (2560×1080)");
    assert_eq!(format_display_name("3x2"), "3x2");
}

#[test]
fn test_result_summary() {
    let result = ProcessingResult {
        download_url: "/download/abc.mp4".to_string(),
        file_size: 1_048_576,
        width: 1920,
        height: 1080,
        duration: 12.7,
    };
    let summary = ResultSummary::new(&result, AspectFormat::Widescreen);

    assert_eq!(summary.preview_source, "/download/abc.mp4");
    assert_eq!(summary.size, "1 MB");
    assert_eq!(summary.resolution, "1920x1080");
    assert_eq!(summary.duration, "13s");
    assert_eq!(summary.format_name, "16:9 (1920×1080)");
}

#[test]
fn test_suggested_output_name() {
    assert_eq!(
        suggested_output_name("holiday.mov", AspectFormat::Vertical),
        "holiday_9x16.mov"
    );
    assert_eq!(suggested_output_name("raw", AspectFormat::Square), "raw_1x1.mp4");
}
