//! Error types for the A2A bridge

use std::time::Duration;
use thiserror::Error;

/// Result type alias for A2A bridge operations
pub type Result<T> = std::result::Result<T, A2aError>;

/// Main error type for the A2A bridge
#[derive(Error, Debug)]
pub enum A2aError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the client while talking to a remote endpoint
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// HTTP status carried by a `Status` error
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Failures of the career pipeline stages, reported to the caller as a 500
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CareerError {
    #[error("Could not extract text from resume.")]
    EmptyResume,

    #[error("Missing stage")]
    MissingStage,

    #[error("Unknown stage '{0}'")]
    UnknownStage(String),

    #[error("Unknown conversation_id")]
    UnknownConversation,

    #[error("Invalid job_index")]
    InvalidJobIndex,
}

impl From<config::ConfigError> for A2aError {
    fn from(err: config::ConfigError) -> Self {
        A2aError::Config(err.to_string())
    }
}
