// Domain rules - Business logic and policies

use std::fmt;
use std::path::Path;

use crate::domain::model::*;

/// Largest upload the service accepts (500 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Reason a candidate file was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAVideo,
    TooLarge,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotAVideo => f.write_str("not a video file"),
            Rejection::TooLarge => f.write_str("file too large, max 500MB"),
        }
    }
}

/// Outcome of checking a candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected(Rejection),
}

/// Business rules for accepting a candidate file
pub struct FileValidator;

impl FileValidator {
    /// Check type first, then size; the first failing rule wins
    pub fn validate(mime_type: &str, size: u64) -> Validation {
        if !mime_type.starts_with("video/") {
            return Validation::Rejected(Rejection::NotAVideo);
        }
        if size > MAX_UPLOAD_BYTES {
            return Validation::Rejected(Rejection::TooLarge);
        }
        Validation::Accepted
    }

    pub fn validate_file(file: &VideoFile) -> Validation {
        Self::validate(&file.mime_type, file.size)
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Render a byte count the way the UI shows it: `0 Bytes`, `1.5 KB`, `1 GB`.
///
/// Steps by 1024 up to GB and keeps at most two fractional digits with
/// trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Round half up: 1.125 shows as 1.13
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{:.2}", rounded);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Display name for a raw format key; unknown keys are shown verbatim
pub fn format_display_name(key: &str) -> String {
    AspectFormat::parse(key)
        .map(|format| format.display_name().to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Everything the result section shows, already rendered to text
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub preview_source: String,
    pub size: String,
    pub resolution: String,
    pub duration: String,
    pub format_name: String,
}

impl ResultSummary {
    pub fn new(result: &ProcessingResult, format: AspectFormat) -> Self {
        Self {
            preview_source: result.download_url.clone(),
            size: format_file_size(result.file_size),
            resolution: result.resolution(),
            duration: result.rounded_duration(),
            format_name: format.display_name().to_string(),
        }
    }
}

/// File name offered for the processed artifact, e.g. `clip_9x16.mp4`
pub fn suggested_output_name(source_name: &str, format: AspectFormat) -> String {
    let path = Path::new(source_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "video".to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());

    format!("{}_{}.{}", stem, format.key(), extension)
}

#[cfg(test)]
mod tests;
