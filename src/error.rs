//! Error types for pagewave
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagewave
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// No response was obtained from the remote at all.
    #[error("Transport failure: {message}")]
    Transport { message: String },

    /// The per-attempt wall-clock timeout expired.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The transport-failure retry budget was spent without ever
    /// obtaining a response.
    #[error("Transport failed after {attempts} attempts")]
    TransportExhausted { attempts: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// A non-success status surfaced to the caller, either a 4xx on the
    /// first attempt or a 5xx after the retry budget was spent.
    #[error("{status} - {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    /// The response body was present but did not match the expected
    /// envelope shape.
    #[error("Malformed envelope: {message}")]
    Envelope { message: String },

    /// A drain-deletion round completed without shrinking the remote
    /// collection; the backend is not compacting.
    #[error("Bulk deletion made no progress, {remaining} items remaining")]
    NoProgress { remaining: u64 },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error
    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Create an envelope error
    pub fn envelope(message: impl Into<String>) -> Self {
        Self::Envelope {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a transport-level failure (no response
    /// obtained), which the executor retries on its transport budget
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Timeout { .. })
    }

    /// Check if this error is retryable at all
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } | Error::Timeout { .. } => true,
            Error::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    (500..600).contains(&status)
}

/// Result type alias for pagewave
pub type Result<T> = std::result::Result<T, Error>;
