//! Nebula Editor Client Library
//!
//! Client-side workflow for the Nebula video processing service: accept a
//! video, configure quality, format and enhancements, submit it over HTTP and
//! present the processed result.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use app::{Resolution, SubmissionTicket, UserIntent, WorkflowController};
pub use domain::errors::{DomainError, TransferError};
pub use domain::model::{
    AspectFormat, Enhancement, ProcessingResult, Quality, Settings, VideoFile, WorkflowState,
};
pub use domain::rules::{format_display_name, format_file_size, FileValidator, Validation};
pub use error::{NebulaError, NebulaResult};
