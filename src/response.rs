//! HTTP response wrapper.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{RestClientError, Result, json};

/// Buffered HTTP response.
///
/// The body is read in full when the response is received, so the
/// underlying transport connection is released before the caller sees the
/// response. Headers and cookies arrive through [`Response::headers`].
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    url: Url,
}

impl Response {
    /// Buffer a reqwest response.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(RestClientError::from_dispatch)?;

        Ok(Self {
            status,
            headers,
            body,
            url,
        })
    }

    /// Synthetic empty OK response, used by the ticket gate short-circuit.
    pub(crate) fn empty(url: Url) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            url,
        }
    }

    /// Get the raw status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body as bytes.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| RestClientError::Json {
            message: format!("Response body is not valid UTF-8: {e}"),
            cause: None,
        })
    }

    /// Consume the response and return the body as text.
    pub fn into_text(self) -> Result<String> {
        self.text()
    }

    /// Decode the response body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        json::decode_slice(&self.body)
    }

    /// Consume the response and decode the body into a typed value.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        self.json()
    }

    /// Get the content type if available.
    pub fn content_type(&self) -> Option<&str> {
        self.header(http::header::CONTENT_TYPE.as_str())
    }

    /// Get the content length if available.
    pub fn content_length(&self) -> Option<u64> {
        self.header(http::header::CONTENT_LENGTH.as_str())
            .and_then(|v| v.parse().ok())
    }
}
