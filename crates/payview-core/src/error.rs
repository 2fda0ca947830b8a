//! Error types for payview-core
//!
//! Remote and decode failures propagate unchanged to the caller; the data
//! layer never retries or suppresses them. Logical misuse of the feed
//! operations (paging past the end) is handled as a no-op and has no error
//! variant here.

use payview_remote::TransportError;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Network or endpoint failure
    Transport,
    /// Response did not match the expected shape
    MalformedResponse,
    /// Parameters could not be serialized
    InvalidParams,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Transport => write!(f, "TRANSPORT"),
            ErrorCode::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            ErrorCode::InvalidParams => write!(f, "INVALID_PARAMS"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - indicates a programming error
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for payview-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Remote call failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Invalid parameters for {endpoint}: {message}")]
    InvalidParams { endpoint: String, message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Transport(_) => ErrorCode::Transport,
            CoreError::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            CoreError::InvalidParams { .. } => ErrorCode::InvalidParams,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Transport(_) => ErrorSeverity::Error,
            CoreError::MalformedResponse { .. } => ErrorSeverity::Error,
            CoreError::InvalidParams { .. } => ErrorSeverity::Critical,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
