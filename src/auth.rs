//! Basic authentication credentials.

use base64::Engine;
use http::HeaderValue;
use serde::Deserialize;

use crate::{RestClientError, Result};

/// Username/password pair for HTTP basic authentication.
///
/// The `Authorization` header value is derived once at client construction
/// and reused for every request; it is never re-encoded per call.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
}

impl Credentials {
    /// Create credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encode as a `Basic <base64(username:password)>` header value string.
    pub fn encode(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(pair);
        format!("Basic {}", encoded)
    }

    /// Precompute the `Authorization` header value.
    ///
    /// Fails with a configuration error when the encoded string is not a
    /// valid header value. Raised at construction, never at request time.
    pub(crate) fn authorization_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.encode()).map_err(|e| {
            RestClientError::Configuration(format!(
                "Cannot encode basic authentication header: {e}"
            ))
        })
    }
}
