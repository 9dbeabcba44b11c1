//! Error handling module for Nebula Editor

use thiserror::Error;

use crate::domain::errors::{DomainError, TransferError};

/// Main error type for Nebula Editor operations
#[derive(Error, Debug)]
pub enum NebulaError {
    /// Workflow, argument or configuration error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Submission or download round trip failed
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Nebula Editor operations
pub type NebulaResult<T> = std::result::Result<T, NebulaError>;
