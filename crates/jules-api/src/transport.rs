//! HTTP transport with retry, backoff, and rate-limit handling
//!
//! The transport owns the base URL, the key header, the per-attempt timeout,
//! and the retry policy. It performs one HTTP exchange per attempt and
//! decides whether to retry: a failure is retryable iff no response was
//! received at all, or the status is in the policy's retryable set. Retries
//! resubmit the identical request, so they are off by default and must be
//! opted into per client.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::auth::{ApiKey, API_KEY_HEADER};
use crate::config::{Config, RetryPolicy};
use crate::error::{ErrorEnvelope, TransportError};
use crate::logging::RequestLogger;

/// One logical request. Built per call, immutable; a retry re-issues it
/// exactly as-is, with only the attempt counter and the delay changing.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and raw body of a successful exchange. Parsing and validation
/// happen a layer up.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Shared, read-only across all calls from one client instance.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    api_key: ApiKey,
    policy: RetryPolicy,
    logger: Arc<dyn RequestLogger>,
}

/// Classified outcome of a single attempt, before the retry decision.
struct AttemptFailure {
    retryable: bool,
    /// Server-provided rate-limit hint; authoritative over computed backoff.
    retry_after: Option<Duration>,
    kind: AttemptErrorKind,
}

enum AttemptErrorKind {
    Connection(reqwest::Error),
    Status { status: u16, body: String },
}

impl Transport {
    pub fn new(config: &Config, logger: Arc<dyn RequestLogger>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.api_base_url.clone(),
            api_key: ApiKey::new(config.api_key.clone()),
            policy: config.retry.clone(),
            logger,
        }
    }

    /// Use a caller-provided `reqwest::Client` instead of building one.
    pub fn with_client(
        http: Client,
        base_url: &str,
        api_key: &str,
        policy: RetryPolicy,
        logger: Arc<dyn RequestLogger>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: ApiKey::new(api_key),
            policy,
            logger,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform the HTTP exchange for `request`, retrying per the policy.
    ///
    /// The attempt counter lives on this stack frame, so concurrent calls
    /// through the same transport never share retry state.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            self.logger.debug(&format!(
                "{} {} (attempt {attempts})",
                request.method, request.path
            ));

            let failure = match self.attempt(request).await {
                Ok(response) => return Ok(response),
                Err(failure) => failure,
            };

            // attempts includes the initial one, so `max_retries` extra
            // attempts means retrying while attempts <= max_retries.
            if !failure.retryable || attempts > self.policy.max_retries {
                if failure.retryable {
                    self.logger.error(&format!(
                        "{} {} failed after {attempts} attempt(s); retry budget exhausted",
                        request.method, request.path
                    ));
                } else {
                    self.logger.error(&format!(
                        "{} {} failed terminally on attempt {attempts}",
                        request.method, request.path
                    ));
                }
                return Err(self.surface(request, attempts, failure));
            }

            let delay = failure
                .retry_after
                .unwrap_or_else(|| backoff_delay(&self.policy, attempts));
            self.logger.warn(&format!(
                "{} {} attempt {attempts} failed; retrying in {delay:?}",
                request.method, request.path
            ));
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(&self, request: &RequestDescriptor) -> Result<RawResponse, AttemptFailure> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            // Nothing came back: connect error or per-attempt timeout.
            Err(err) => {
                return Err(AttemptFailure {
                    retryable: true,
                    retry_after: None,
                    kind: AttemptErrorKind::Connection(err),
                })
            }
        };

        let status = response.status();
        if status.is_success() {
            match response.text().await {
                Ok(body) => Ok(RawResponse {
                    status: status.as_u16(),
                    body,
                }),
                // Connection dropped mid-body.
                Err(err) => Err(AttemptFailure {
                    retryable: true,
                    retry_after: None,
                    kind: AttemptErrorKind::Connection(err),
                }),
            }
        } else {
            let retryable = self.policy.is_retryable_status(status.as_u16());
            let retry_after = if retryable {
                parse_retry_after(response.headers().get(RETRY_AFTER))
            } else {
                None
            };
            let body = response.text().await.unwrap_or_default();
            Err(AttemptFailure {
                retryable,
                retry_after,
                kind: AttemptErrorKind::Status {
                    status: status.as_u16(),
                    body,
                },
            })
        }
    }

    fn surface(
        &self,
        request: &RequestDescriptor,
        attempts: u32,
        failure: AttemptFailure,
    ) -> TransportError {
        match failure.kind {
            AttemptErrorKind::Connection(source) => TransportError::Connection {
                method: request.method.to_string(),
                path: request.path.clone(),
                attempts,
                source,
            },
            AttemptErrorKind::Status { status, body } => {
                let error = serde_json::from_str::<ErrorEnvelope>(&body)
                    .ok()
                    .map(|envelope| envelope.error);
                TransportError::Status {
                    method: request.method.to_string(),
                    path: request.path.clone(),
                    status,
                    attempts,
                    retryable: failure.retryable,
                    body,
                    error,
                }
            }
        }
    }
}

/// Exponential backoff for retry number `attempt` (counted from 1), doubling
/// from the initial delay and capped at the maximum.
pub(crate) fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(31);
    let millis = policy
        .initial_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(policy.max_delay_ms);
    Duration::from_millis(millis)
}

/// `Retry-After` is either a whole number of seconds or an HTTP-date. A date
/// in the past floors to zero.
pub(crate) fn parse_retry_after(value: Option<&HeaderValue>) -> Option<Duration> {
    let raw = value?.to_str().ok()?.trim();
    if let Ok(seconds) = raw.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let date = DateTime::parse_from_rfc2822(raw).ok()?;
    let delta = date.with_timezone(&Utc) - Utc::now();
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}
