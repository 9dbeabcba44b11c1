// Domain errors - Error types for the domain layer

use std::fmt;

use thiserror::Error;

use crate::domain::model::WorkflowState;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Intent not accepted in the current workflow state
    InvalidTransition {
        state: WorkflowState,
        intent: &'static str,
    },
    /// Configuration could not be loaded or validated
    ConfigFail(String),
    /// Local file could not be read or probed
    FsFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::InvalidTransition { state, intent } => {
                write!(f, "Intent '{}' is not accepted in state {}", intent, state)
            }
            DomainError::ConfigFail(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Failure of a submission round trip.
///
/// Every variant renders as a message fit for a transient notice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    /// The request never produced a response (connection refused, reset, ...)
    #[error("network error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status; the body is ignored
    #[error("processing error")]
    Status(u16),

    /// The service answered `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The body was not the JSON document the service promises
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The selected file could not be read for upload
    #[error("could not read video: {0}")]
    Io(String),

    /// The request body could not be assembled
    #[error("could not encode request: {0}")]
    Encoding(String),
}

impl TransferError {
    /// Build the application-level failure, falling back to a generic message
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.is_empty() => TransferError::Rejected(msg),
            _ => TransferError::Rejected("unknown error".to_string()),
        }
    }

    /// Whether the failure happened before an HTTP response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, TransferError::Transport(_) | TransferError::Io(_))
    }
}
