//! Request builder.

use std::collections::BTreeMap;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::identity::{IdentityContext, combine_headers};
use crate::{Response, RestClient, RestClientError, Result};

/// Cookie whose presence gates ticket-required GET requests.
pub const TICKET_COOKIE: &str = "encodedTicket";

/// Override header attached to PATCH requests for intermediaries that
/// strip the PATCH verb.
pub const HEADER_METHOD_OVERRIDE: &str = "x-http-method-override";

/// Per-request options and dispatch.
///
/// Built fresh for every call and discarded afterwards. All options are
/// defaultable; the single builder per verb replaces the overload family a
/// positional-argument surface would need.
pub struct RequestBuilder<'a> {
    client: &'a RestClient,
    method: Method,
    path: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    cookies: BTreeMap<String, String>,
    forwarded_for: Option<String>,
    identity: Option<IdentityContext>,
    media_type: Option<String>,
    body: Option<std::result::Result<Vec<u8>, serde_json::Error>>,
    ticket_required: bool,
}

impl<'a> RequestBuilder<'a> {
    /// Create a new request builder.
    pub(crate) fn new(client: &'a RestClient, method: Method, path: String) -> Self {
        Self {
            client,
            method,
            path,
            headers: HeaderMap::new(),
            query: Vec::new(),
            cookies: BTreeMap::new(),
            forwarded_for: None,
            identity: None,
            media_type: None,
            body: None,
            ticket_required: false,
        }
    }

    /// Add a header to the request. Invalid header names or values are
    /// silently skipped.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter. Repeated keys accumulate in order.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.query.push((k.into(), v.into()));
        }
        self
    }

    /// Add a cookie. Cookie names are unique; a repeated name replaces the
    /// earlier value.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Add multiple cookies.
    pub fn cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in cookies {
            self.cookies.insert(name.into(), value.into());
        }
        self
    }

    /// Set the `X-Forwarded-For` value propagated downstream.
    pub fn forwarded_for(mut self, value: impl ToString) -> Self {
        self.forwarded_for = Some(value.to_string());
        self
    }

    /// Attach the caller's identity, propagated as `userId` and
    /// `emarketsId` headers.
    pub fn identity(mut self, identity: IdentityContext) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Override the negotiated media type for this request.
    ///
    /// [`crate::APPLICATION_VND_API_JSON`] disables status normalization
    /// for the call.
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Set the request body entity, serialized as JSON.
    pub fn json<T: Serialize>(mut self, entity: &T) -> Self {
        self.body = Some(serde_json::to_vec(entity));
        self
    }

    /// Require the ticket cookie before dispatching.
    ///
    /// When the [`TICKET_COOKIE`] is absent from the supplied cookies the
    /// request is not sent and an empty OK response is returned instead.
    pub fn ticket_required(mut self) -> Self {
        self.ticket_required = true;
        self
    }

    /// Build the request URL from the endpoint, resource path, and query
    /// parameters.
    fn build_url(&self) -> Result<Url> {
        let mut url = if self.path.is_empty() {
            self.client.endpoint().clone()
        } else {
            let joined = format!(
                "{}/{}",
                self.client.endpoint().as_str().trim_end_matches('/'),
                self.path.trim_start_matches('/')
            );
            Url::parse(&joined).map_err(|e| {
                RestClientError::Unexpected(format!("Invalid resource path {:?}: {e}", self.path))
            })?
        };

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send the request and return the buffered response.
    ///
    /// Caller headers are merged with the derived identity and forwarding
    /// headers (derived values win on a literal key collision), the
    /// precomputed `Authorization` header is attached when credentials were
    /// configured, and the negotiated media type becomes the `Accept` (and,
    /// with a body, `Content-Type`) header. Unless disabled, non-OK
    /// normalized statuses fail the call with a
    /// [`RestClientError::RemoteStatus`].
    pub async fn send(self) -> Result<Response> {
        if self.ticket_required && !self.cookies.contains_key(TICKET_COOKIE) {
            debug!(path = %self.path, "Ticket cookie absent, skipping request");
            return Ok(Response::empty(self.client.endpoint().clone()));
        }

        let url = self.build_url()?;
        let media_type = self
            .media_type
            .unwrap_or_else(|| self.client.config().media_type.clone());
        let identity = self.identity.unwrap_or_default();
        let headers = combine_headers(
            Some(&self.headers),
            self.forwarded_for.as_deref(),
            identity.user_id,
            identity.emarkets_id.as_deref(),
        );

        let mut request = self.client.inner().request(self.method.clone(), url);

        for (name, value) in &headers {
            request = request.header(name, value);
        }

        if self.method == Method::PATCH {
            request = request.header(HEADER_METHOD_OVERRIDE, "PATCH");
        }

        if let Some(authorization) = self.client.authorization() {
            request = request.header(http::header::AUTHORIZATION, authorization.clone());
        }

        request = request.header(http::header::ACCEPT, media_type.as_str());

        if !self.cookies.is_empty() {
            request = request.header(http::header::COOKIE, cookie_header(&self.cookies));
        }

        if let Some(body) = self.body {
            let body = body.map_err(|e| {
                RestClientError::Unexpected(format!("Failed to serialize request body: {e}"))
            })?;
            request = request
                .header(http::header::CONTENT_TYPE, media_type.as_str())
                .body(body);
        }

        let request = request
            .build()
            .map_err(|e| RestClientError::Unexpected(format!("Failed to build request: {e}")))?;

        self.client.execute(request, &media_type).await
    }

    /// Send the request and return the body as text.
    pub async fn send_text(self) -> Result<String> {
        self.send().await?.into_text()
    }

    /// Send the request and decode the body into a typed value.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T> {
        self.send().await?.into_json()
    }

    /// Send the request and decode the body into an untyped JSON value.
    pub async fn send_value(self) -> Result<serde_json::Value> {
        self.send_json().await
    }
}

/// Render cookies as a single `Cookie` header value.
fn cookie_header(cookies: &BTreeMap<String, String>) -> String {
    let mut header = String::new();
    for (name, value) in cookies {
        if !header.is_empty() {
            header.push_str("; ");
        }
        header.push_str(name);
        header.push('=');
        header.push_str(value);
    }
    header
}
