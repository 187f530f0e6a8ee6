//! Jules API client library
//!
//! This crate provides a Rust client for the Jules API, enabling programmatic
//! access to Jules's AI coding agent capabilities. Every response is checked
//! against a declarative schema before it is returned, and each call can opt
//! into retry with exponential backoff and `Retry-After` handling.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
mod executor;
pub mod logging;
pub mod pagination;
pub mod schema;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;

// Re-exports
pub use client::JulesClient;
pub use config::{Config, RetryPolicy};
pub use error::{ErrorBody, JulesError, TransportError};
pub use logging::{NoopLogger, RequestLogger, TracingLogger};
pub use schema::{ValidationFailure, Violation};
pub use types::{
    Activity, Artifact, CreateSessionRequest, ListActivitiesResponse, ListSessionsResponse,
    ListSourcesResponse, Session, SessionState, Source, SourceContext,
};

pub type Result<T> = std::result::Result<T, JulesError>;
