//! Authentication for the Jules API
//!
//! The API uses a static key attached to every request; there is no token
//! refresh or scheme negotiation.

use std::fmt;

/// Header the API expects the key in.
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// A static Jules API key.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the key out of debug output and log lines.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(..redacted..)")
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
