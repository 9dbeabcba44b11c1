// Ports - Interface definitions (contracts)

use std::collections::BTreeSet;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::ResultSummary;
use async_trait::async_trait;

/// Port for the remote processing service
#[async_trait]
pub trait TransferPort: Send + Sync {
    /// Upload `file` with `settings` and wait for the service to answer.
    ///
    /// Exactly one request per call; no retries.
    async fn submit(
        &self,
        file: &VideoFile,
        settings: &Settings,
    ) -> Result<ProcessingResult, TransferError>;
}

/// Port for the rendering surface the workflow drives.
///
/// Calls are synchronous and must not fail; a surface that cannot render
/// something should drop it.
pub trait PresentationPort: Send + Sync {
    /// Show exactly this section and hide the others
    fn render_section(&self, state: WorkflowState);

    /// Describe the accepted file
    fn render_file_info(&self, name: &str, size: &str, preview_source: &str);

    /// Highlight the active quality, format and enhancements
    fn render_active_choices(
        &self,
        quality: Quality,
        format: AspectFormat,
        enhancements: &BTreeSet<Enhancement>,
    );

    /// Progress of the in-flight request
    fn render_progress(&self, update: &ProgressUpdate);

    /// Describe the processed video
    fn render_result(&self, summary: &ResultSummary);

    /// Offer the processed artifact for download
    fn offer_download(&self, download_url: &str, suggested_name: &str);

    /// Short-lived message; a newer notice may replace an older one
    fn show_notice(&self, message: &str);
}

/// Progress of the in-flight request, as shown in the progress section
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub percent: u8,
    pub status: String,
    pub detail: String,
}

impl ProgressUpdate {
    /// Create a progress update, clamping `percent` to 0..=100
    pub fn new(percent: f32, status: impl Into<String>, detail: impl Into<String>) -> Self {
        let percent = if percent.is_nan() {
            0
        } else {
            percent.clamp(0.0, 100.0).round() as u8
        };
        Self {
            percent,
            status: status.into(),
            detail: detail.into(),
        }
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
