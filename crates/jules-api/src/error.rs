use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::ValidationFailure;

/// Every failed call ends in exactly one of these three kinds.
#[derive(Error, Debug)]
pub enum JulesError {
    /// Network-level failure or non-2xx HTTP outcome, already classified
    /// retryable or terminal by the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response arrived but its body does not match the expected shape.
    /// Never retried; resending an identical request cannot fix it.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Caller-supplied input rejected before any network call was made.
    #[error("precondition failed: {message}")]
    Precondition { message: String },
}

impl JulesError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }
}

/// Outcome of the HTTP exchange when no usable response body was obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response was received at all: connect failure, timeout, or the
    /// connection dropped mid-body. Always classified retryable.
    #[error("{method} {path} failed after {attempts} attempt(s): {source}")]
    Connection {
        method: String,
        path: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{method} {path} returned HTTP {status} after {attempts} attempt(s){}", api_message_suffix(.error))]
    Status {
        method: String,
        path: String,
        status: u16,
        attempts: u32,
        retryable: bool,
        /// Raw response body, kept for diagnosis.
        body: String,
        /// Parsed upstream error envelope, when the body carried one.
        error: Option<ErrorBody>,
    },
}

impl TransportError {
    /// Status code of the final attempt, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Connection { .. } => None,
            Self::Status { status, .. } => Some(*status),
        }
    }

    /// Whether the final attempt was classified retryable. A `true` here
    /// means the retry budget ran out, not that the failure was terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } => true,
            Self::Status { retryable, .. } => *retryable,
        }
    }

    /// Total attempts made for the call, including the first.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Connection { attempts, .. } | Self::Status { attempts, .. } => *attempts,
        }
    }
}

/// The `error` object the API nests in failure bodies:
/// `{ "error": { "code": ..., "message": ..., "status": ..., "details": [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

fn api_message_suffix(error: &Option<ErrorBody>) -> String {
    match error {
        Some(body) => format!(": {}", body.message),
        None => String::new(),
    }
}
