use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    pub api_key: String,
    /// Per-attempt timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Config {
    pub fn new(api_key: String) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key,
            request_timeout: default_request_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry behavior for one client instance.
///
/// Retries are opt-in: the default policy makes exactly one attempt per call.
/// Only enable retries for calls whose side effects are safe to resubmit.
#[derive(Debug, Deserialize, Clone)]
pub struct RetryPolicy {
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_retryable_statuses")]
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            retryable_statuses: default_retryable_statuses(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://jules.googleapis.com/v1alpha".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_retryable_statuses() -> Vec<u16> {
    vec![408, 429, 500, 502, 503, 504]
}
