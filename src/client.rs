//! REST client facade.

use std::sync::Arc;

use http::{HeaderValue, Method};
use tracing::{debug, error};
use url::Url;

use crate::config::APPLICATION_VND_API_JSON;
use crate::status::NormalizedStatus;
use crate::{RequestBuilder, Response, RestClientConfig, RestClientError, Result};

/// JSON REST client for a single downstream service.
///
/// Holds the immutable endpoint URL and the `Authorization` header value
/// precomputed from the configured credentials. All per-call state lives in
/// the [`RequestBuilder`], so one client instance is safely shared across
/// concurrent callers. The client performs no retries and owns no timeout
/// policy; both are left to the caller and the transport.
#[derive(Debug, Clone)]
pub struct RestClient {
    inner: reqwest::Client,
    config: Arc<RestClientConfig>,
    endpoint: Url,
    authorization: Option<HeaderValue>,
}

impl RestClient {
    /// Create a new client for the configured endpoint.
    ///
    /// Derives the endpoint URL (appending the port only when it is not the
    /// scheme default) and encodes the basic auth header once. Every
    /// failure here is a configuration error and fatal at startup.
    pub fn new(config: RestClientConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let authorization = config
            .credentials
            .as_ref()
            .map(|credentials| credentials.authorization_header())
            .transpose()?;

        let inner = reqwest::Client::builder().build().map_err(|e| {
            RestClientError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            endpoint,
            authorization,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the derived endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the underlying reqwest client.
    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get the precomputed `Authorization` header value.
    pub(crate) fn authorization(&self) -> Option<&HeaderValue> {
        self.authorization.as_ref()
    }

    /// Create a GET request builder.
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, path.into())
    }

    /// Create a POST request builder.
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, path.into())
    }

    /// Create a PUT request builder.
    pub fn put(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PUT, path.into())
    }

    /// Create a PATCH request builder.
    ///
    /// Sent as a native PATCH with an `X-HTTP-Method-Override: PATCH`
    /// header for intermediaries that strip the verb.
    pub fn patch(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PATCH, path.into())
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::DELETE, path.into())
    }

    /// Create a request builder with a custom method.
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, path.into())
    }

    /// Dispatch a built request and normalize the outcome.
    ///
    /// Connection and I/O faults surface as transport failures, anything
    /// else as unexpected failures. When normalization applies (enabled in
    /// the config and the media type is not the vendor JSON API type), a
    /// non-OK normalized status drops the buffered response and fails the
    /// call with that status.
    pub(crate) async fn execute(
        &self,
        request: reqwest::Request,
        media_type: &str,
    ) -> Result<Response> {
        let method = request.method().clone();

        let raw = match self.inner.execute(request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(method = %method, error = %e, "Request failed");
                return Err(RestClientError::from_dispatch(e));
            }
        };

        let status = raw.status();
        debug!(code = status.as_u16(), url = %raw.url(), "HTTP code returned");

        let response = Response::from_reqwest(raw).await?;

        if self.config.normalize_status && media_type != APPLICATION_VND_API_JSON {
            let normalized = NormalizedStatus::from(status);
            if !normalized.is_ok() {
                drop(response);
                return Err(RestClientError::RemoteStatus {
                    status: normalized,
                    code: status.as_u16(),
                });
            }
        }

        Ok(response)
    }
}
