// Terminal presenter - Renders workflow sections as plain text

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::model::*;
use crate::domain::rules::ResultSummary;
use crate::ports::*;

/// A notice and the moment it stops being visible
#[derive(Debug, Clone)]
struct Notice {
    message: String,
    expires_at: Instant,
}

/// Artifact offered through the download intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOffer {
    pub url: String,
    pub suggested_name: String,
}

/// Presenter writing to a terminal (or any writer).
///
/// Holds a single notice slot; a newer notice replaces the current one.
pub struct TerminalPresenter {
    out: Mutex<Box<dyn Write + Send>>,
    notice: Mutex<Option<Notice>>,
    offer: Mutex<Option<DownloadOffer>>,
    section: Mutex<Option<WorkflowState>>,
    notice_duration: Duration,
}

impl TerminalPresenter {
    pub fn stdout(notice_duration: Duration) -> Self {
        Self::with_writer(Box::new(io::stdout()), notice_duration)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, notice_duration: Duration) -> Self {
        Self {
            out: Mutex::new(out),
            notice: Mutex::new(None),
            offer: Mutex::new(None),
            section: Mutex::new(None),
            notice_duration,
        }
    }

    /// Currently visible notice, if it has not expired yet
    pub fn active_notice(&self) -> Option<String> {
        self.active_notice_at(Instant::now())
    }

    fn active_notice_at(&self, now: Instant) -> Option<String> {
        let mut slot = self.notice.lock().ok()?;
        if slot.as_ref().is_some_and(|notice| now >= notice.expires_at) {
            *slot = None;
        }
        slot.as_ref().map(|notice| notice.message.clone())
    }

    /// Last artifact offered for download
    pub fn download_offer(&self) -> Option<DownloadOffer> {
        self.offer.lock().ok().and_then(|offer| offer.clone())
    }

    /// Section currently shown
    pub fn current_section(&self) -> Option<WorkflowState> {
        self.section.lock().ok().and_then(|section| *section)
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            // Rendering is best effort; a closed pipe must not break the workflow.
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

fn section_title(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::Upload => "Upload a video",
        WorkflowState::Configure => "Configure processing",
        WorkflowState::InProgress => "Processing",
        WorkflowState::Result => "Result",
    }
}

impl PresentationPort for TerminalPresenter {
    fn render_section(&self, state: WorkflowState) {
        if let Ok(mut section) = self.section.lock() {
            *section = Some(state);
        }
        self.line(&format!("== {} ==", section_title(state)));
    }

    fn render_file_info(&self, name: &str, size: &str, preview_source: &str) {
        self.line(&format!("File:     {} ({})", name, size));
        self.line(&format!("Preview:  {}", preview_source));
    }

    fn render_active_choices(
        &self,
        quality: Quality,
        format: AspectFormat,
        enhancements: &BTreeSet<Enhancement>,
    ) {
        let enhancements = if enhancements.is_empty() {
            "none".to_string()
        } else {
            enhancements
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        self.line(&format!(
            "Settings: quality={} format={} enhancements={}",
            quality,
            format.display_name(),
            enhancements
        ));
    }

    fn render_progress(&self, update: &ProgressUpdate) {
        self.line(&format!(
            "[{:>3}%] {} {}",
            update.percent, update.status, update.detail
        ));
    }

    fn render_result(&self, summary: &ResultSummary) {
        self.line(&format!("Video:      {}", summary.preview_source));
        self.line(&format!("Size:       {}", summary.size));
        self.line(&format!("Resolution: {}", summary.resolution));
        self.line(&format!("Duration:   {}", summary.duration));
        self.line(&format!("Format:     {}", summary.format_name));
    }

    fn offer_download(&self, download_url: &str, suggested_name: &str) {
        if let Ok(mut offer) = self.offer.lock() {
            *offer = Some(DownloadOffer {
                url: download_url.to_string(),
                suggested_name: suggested_name.to_string(),
            });
        }
        self.line(&format!("Download: {} -> {}", download_url, suggested_name));
    }

    fn show_notice(&self, message: &str) {
        if let Ok(mut slot) = self.notice.lock() {
            *slot = Some(Notice {
                message: message.to_string(),
                expires_at: Instant::now() + self.notice_duration,
            });
        }
        self.line(&format!("! {}", message));
    }
}
