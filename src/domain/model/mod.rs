// Domain models - Core types and data structures

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Output quality tier requested from the processing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Lossless,
    High,
    Balanced,
    Compact,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::Lossless,
        Quality::High,
        Quality::Balanced,
        Quality::Compact,
    ];

    /// Parse quality from string (case insensitive)
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let key = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|quality| quality.as_str() == key)
            .ok_or_else(|| {
                DomainError::BadArgs(format!(
                    "Invalid quality: {}. Valid values: {}",
                    value,
                    join_keys(Self::ALL.iter().map(|q| q.as_str()))
                ))
            })
    }

    /// Wire key sent to the service
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Lossless => "lossless",
            Quality::High => "high",
            Quality::Balanced => "balanced",
            Quality::Compact => "compact",
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::Lossless
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target aspect ratio preset for the output video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AspectFormat {
    #[serde(rename = "1x1")]
    Square,
    #[serde(rename = "9x16")]
    Vertical,
    #[serde(rename = "16x9")]
    Widescreen,
    #[serde(rename = "4x5")]
    Portrait,
    #[serde(rename = "1x2")]
    Tall,
    #[serde(rename = "2x1")]
    Wide,
    #[serde(rename = "21x9")]
    Ultrawide,
}

impl AspectFormat {
    pub const ALL: [AspectFormat; 7] = [
        AspectFormat::Square,
        AspectFormat::Vertical,
        AspectFormat::Widescreen,
        AspectFormat::Portrait,
        AspectFormat::Tall,
        AspectFormat::Wide,
        AspectFormat::Ultrawide,
    ];

    /// Parse format from its key, e.g. `9x16`
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let key = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.key() == key)
            .ok_or_else(|| {
                DomainError::BadArgs(format!(
                    "Invalid format: {}. Valid values: {}",
                    value,
                    join_keys(Self::ALL.iter().map(|f| f.key()))
                ))
            })
    }

    /// Wire key sent to the service
    pub fn key(&self) -> &'static str {
        match self {
            AspectFormat::Square => "1x1",
            AspectFormat::Vertical => "9x16",
            AspectFormat::Widescreen => "16x9",
            AspectFormat::Portrait => "4x5",
            AspectFormat::Tall => "1x2",
            AspectFormat::Wide => "2x1",
            AspectFormat::Ultrawide => "21x9",
        }
    }

    /// Human readable ratio and resolution
    pub fn display_name(&self) -> &'static str {
        match self {
            AspectFormat::Square => "1:1 (1080×1080)",
            AspectFormat::Vertical => "9:16 (1080×1920)",
            AspectFormat::Widescreen => "16:9 (1920×1080)",
            AspectFormat::Portrait => "4:5 (1080×1350)",
            AspectFormat::Tall => "1:2 (1080×2160)",
            AspectFormat::Wide => "2:1 (2160×1080)",
            AspectFormat::Ultrawide => "21:9 (2560×1080)",
        }
    }

    /// Output frame size in pixels (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectFormat::Square => (1080, 1080),
            AspectFormat::Vertical => (1080, 1920),
            AspectFormat::Widescreen => (1920, 1080),
            AspectFormat::Portrait => (1080, 1350),
            AspectFormat::Tall => (1080, 2160),
            AspectFormat::Wide => (2160, 1080),
            AspectFormat::Ultrawide => (2560, 1080),
        }
    }
}

impl Default for AspectFormat {
    fn default() -> Self {
        AspectFormat::Square
    }
}

impl fmt::Display for AspectFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Optional post-processing feature requested alongside quality and format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enhancement {
    Stabilize,
    Denoise,
    ColorCorrect,
    Sharpen,
    Upscale,
    AudioCleanup,
}

impl Enhancement {
    pub const ALL: [Enhancement; 6] = [
        Enhancement::Stabilize,
        Enhancement::Denoise,
        Enhancement::ColorCorrect,
        Enhancement::Sharpen,
        Enhancement::Upscale,
        Enhancement::AudioCleanup,
    ];

    /// Parse enhancement from string (case insensitive)
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let key = value.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|enhancement| enhancement.as_str() == key)
            .ok_or_else(|| {
                DomainError::BadArgs(format!(
                    "Invalid enhancement: {}. Valid values: {}",
                    value,
                    join_keys(Self::ALL.iter().map(|e| e.as_str()))
                ))
            })
    }

    /// Wire key sent to the service
    pub fn as_str(&self) -> &'static str {
        match self {
            Enhancement::Stabilize => "stabilize",
            Enhancement::Denoise => "denoise",
            Enhancement::ColorCorrect => "color_correct",
            Enhancement::Sharpen => "sharpen",
            Enhancement::Upscale => "upscale",
            Enhancement::AudioCleanup => "audio_cleanup",
        }
    }
}

impl fmt::Display for Enhancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.collect::<Vec<_>>().join(", ")
}

/// Processing configuration for the current session.
///
/// Serializes to the `settings` part of a submission:
/// `{"quality": "lossless", "format": "1x1", "enhancements": []}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub quality: Quality,
    pub format: AspectFormat,
    pub enhancements: BTreeSet<Enhancement>,
}

impl Settings {
    pub fn select_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    pub fn select_format(&mut self, format: AspectFormat) {
        self.format = format;
    }

    /// Flip membership of `enhancement`; returns whether it is now active
    pub fn toggle_enhancement(&mut self, enhancement: Enhancement) -> bool {
        if self.enhancements.remove(&enhancement) {
            false
        } else {
            self.enhancements.insert(enhancement);
            true
        }
    }

    pub fn is_enabled(&self, enhancement: Enhancement) -> bool {
        self.enhancements.contains(&enhancement)
    }

    /// Restore `lossless`, `1x1`, no enhancements
    pub fn reset(&mut self) {
        *self = Settings::default();
    }

    /// JSON document sent under the `settings` form field
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::BadArgs(format!("Failed to encode settings: {}", e)))
    }
}

/// A local video file offered to the workflow.
///
/// The bytes stay on disk until submission; only the descriptor is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: PathBuf,
}

impl VideoFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            path: path.into(),
        }
    }

    /// Location a presenter can use to preview the local file
    pub fn preview_source(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Completed output of the processing service
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    pub download_url: String,
    pub file_size: u64,
    pub width: u32,
    pub height: u32,
    /// Seconds
    pub duration: f64,
}

impl ProcessingResult {
    /// Resolution rendered as `WxH`
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Duration rounded to whole seconds, rendered as `Ns`
    pub fn rounded_duration(&self) -> String {
        format!("{}s", self.duration.max(0.0).round() as u64)
    }
}

/// Section of the workflow currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Upload,
    Configure,
    InProgress,
    Result,
}

impl WorkflowState {
    pub const ALL: [WorkflowState; 4] = [
        WorkflowState::Upload,
        WorkflowState::Configure,
        WorkflowState::InProgress,
        WorkflowState::Result,
    ];
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::Upload
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::Upload => "upload",
            WorkflowState::Configure => "configure",
            WorkflowState::InProgress => "in-progress",
            WorkflowState::Result => "result",
        };
        f.write_str(name)
    }
}
