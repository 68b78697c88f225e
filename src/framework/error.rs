//! # Framework Errors
//!
//! Common error types used by the transport, the endpoints and the stores.
//! Stores never return these to their callers; they collect them in their
//! `errors` list instead, so every variant is `Clone`.

use thiserror::Error;

/// Errors produced while talking to the backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be mapped to the expected record.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Reading or writing the persisted session failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of a server-side failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Errors raised by a [`SessionPersistence`](crate::framework::SessionPersistence) backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(String),
    #[error("Session storage is corrupt: {0}")]
    Serde(String),
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Serde(e.to_string())
    }
}
