//! # JSON REST Client
//!
//! A service-to-service HTTP client facade for calling a downstream JSON
//! API with optional basic authentication, per-request identity
//! propagation, and client-proxy forwarding metadata.
//!
//! ## Features
//!
//! - **Basic Auth**: credentials encoded once at construction into a reused
//!   `Authorization` header
//! - **Identity Propagation**: caller identity forwarded as `userId` and
//!   `emarketsId` headers, plus `X-Forwarded-For`
//! - **Status Normalization**: downstream statuses collapsed into five
//!   coarse categories the calling application treats uniformly
//! - **Typed Bodies**: response bodies decoded on demand into typed values,
//!   with a JSON error taxonomy distinct from transport failures
//! - **Ticket Gating**: GET requests that require a session ticket cookie
//!   short-circuit to an empty result when the ticket is absent
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use json_rest_client::{Credentials, IdentityContext, RestClient, RestClientConfig};
//!
//! #[derive(serde::Deserialize)]
//! struct Account {
//!     id: i64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RestClientConfig::builder()
//!         .base_uri("http://api.internal")
//!         .base_port(8080)
//!         .credentials(Credentials::new("svc-user", "svc-pass"))
//!         .build();
//!
//!     let client = RestClient::new(config)?;
//!
//!     let account: Account = client
//!         .get("accounts/42")
//!         .identity(IdentityContext::new(42, "em-9"))
//!         .forwarded_for("10.0.0.1")
//!         .send_json()
//!         .await?;
//!
//!     println!("Account: {}", account.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Vendor JSON API media type
//!
//! Requests negotiated with `application/vnd.api+json` bypass status
//! normalization entirely; the raw response is returned so the caller can
//! apply API-specific status handling.
//!
//! ```rust,no_run
//! use json_rest_client::{APPLICATION_VND_API_JSON, RestClient, RestClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new(RestClientConfig::new("http://api.internal", 8080))?;
//!
//!     let response = client
//!         .get("articles/1")
//!         .media_type(APPLICATION_VND_API_JSON)
//!         .send()
//!         .await?;
//!
//!     // 404 and friends arrive here uninterpreted.
//!     println!("Raw status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod identity;
pub mod json;
mod request;
mod response;
mod status;

pub use auth::Credentials;
pub use client::RestClient;
pub use config::{
    APPLICATION_JSON, APPLICATION_VND_API_JSON, RestClientConfig, RestClientConfigBuilder,
};
pub use error::{RestClientError, Result};
pub use identity::{
    HEADER_EMARKETS_ID, HEADER_USER_ID, HEADER_X_FORWARDED_FOR, IdentityContext,
};
pub use request::{HEADER_METHOD_OVERRIDE, RequestBuilder, TICKET_COOKIE};
pub use response::Response;
pub use status::NormalizedStatus;

// Re-export common types
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;
pub use bytes::Bytes;

/// Prelude for common imports.
///
/// ```
/// use json_rest_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::Credentials;
    pub use crate::client::RestClient;
    pub use crate::config::{
        APPLICATION_JSON, APPLICATION_VND_API_JSON, RestClientConfig, RestClientConfigBuilder,
    };
    pub use crate::error::{RestClientError, Result};
    pub use crate::identity::IdentityContext;
    pub use crate::request::RequestBuilder;
    pub use crate::response::Response;
    pub use crate::status::NormalizedStatus;
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
}
