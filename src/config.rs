//! REST client configuration.

use serde::Deserialize;
use url::Url;

use crate::auth::Credentials;
use crate::{RestClientError, Result};

/// Default media type for requests and responses.
pub const APPLICATION_JSON: &str = "application/json";

/// Vendor JSON API media type.
///
/// Negotiating this media type opts the call out of status normalization so
/// the caller can apply API-specific status handling to the raw response.
pub const APPLICATION_VND_API_JSON: &str = "application/vnd.api+json";

const HTTP_SCHEME: &str = "http://";
const HTTPS_SCHEME: &str = "https://";

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_HTTPS_PORT: u16 = 443;

fn default_media_type() -> String {
    APPLICATION_JSON.to_string()
}

fn default_normalize_status() -> bool {
    true
}

/// REST client configuration.
///
/// Immutable after construction; the hosting application binds it from its
/// configuration file (camelCase keys) or assembles it with the builder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestClientConfig {
    /// Scheme-qualified base URI of the downstream service.
    pub base_uri: String,
    /// Port the downstream service listens on.
    pub base_port: u16,
    /// Optional basic authentication credentials.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Default media type negotiated per request.
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Whether non-OK statuses are normalized into error categories.
    #[serde(default = "default_normalize_status")]
    pub normalize_status: bool,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_uri: String::new(),
            base_port: DEFAULT_HTTP_PORT,
            credentials: None,
            media_type: default_media_type(),
            normalize_status: default_normalize_status(),
        }
    }
}

impl RestClientConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(base_uri: impl Into<String>, base_port: u16) -> Self {
        Self {
            base_uri: base_uri.into(),
            base_port,
            ..Self::default()
        }
    }

    /// Create a new configuration builder.
    pub fn builder() -> RestClientConfigBuilder {
        RestClientConfigBuilder::default()
    }

    /// Derive the endpoint URL all requests are issued against.
    ///
    /// The configured port is appended to the base URI only when it differs
    /// from the scheme's default port (http/80, https/443); otherwise the
    /// bare URI is used.
    pub fn endpoint_url(&self) -> Result<Url> {
        let needs_port = (self.base_uri.starts_with(HTTP_SCHEME)
            && self.base_port != DEFAULT_HTTP_PORT)
            || (self.base_uri.starts_with(HTTPS_SCHEME) && self.base_port != DEFAULT_HTTPS_PORT);

        let uri = if needs_port {
            format!("{}:{}", self.base_uri, self.base_port)
        } else {
            self.base_uri.clone()
        };

        Url::parse(&uri)
            .map_err(|e| RestClientError::Configuration(format!("Invalid base URI {uri:?}: {e}")))
    }
}

/// Builder for REST client configuration.
#[derive(Debug, Default)]
pub struct RestClientConfigBuilder {
    config: RestClientConfig,
}

impl RestClientConfigBuilder {
    /// Set the scheme-qualified base URI.
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.base_uri = uri.into();
        self
    }

    /// Set the downstream port.
    pub fn base_port(mut self, port: u16) -> Self {
        self.config.base_port = port;
        self
    }

    /// Set basic authentication credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// Set the default media type for requests.
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.config.media_type = media_type.into();
        self
    }

    /// Enable or disable status normalization.
    pub fn normalize_status(mut self, enable: bool) -> Self {
        self.config.normalize_status = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RestClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_http_port_is_not_appended() {
        let config = RestClientConfig::new("http://api.internal", 80);
        assert_eq!(config.endpoint_url().unwrap().as_str(), "http://api.internal/");
    }

    #[test]
    fn test_non_default_http_port_is_appended() {
        let config = RestClientConfig::new("http://api.internal", 8080);
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://api.internal:8080/"
        );
        assert_eq!(config.endpoint_url().unwrap().port(), Some(8080));
    }

    #[test]
    fn test_default_https_port_is_not_appended() {
        let config = RestClientConfig::new("https://api.internal", 443);
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "https://api.internal/");
        assert!(url.port().is_none());
    }

    #[test]
    fn test_non_default_https_port_is_appended() {
        let config = RestClientConfig::new("https://api.internal", 8443);
        assert_eq!(config.endpoint_url().unwrap().port(), Some(8443));
    }

    #[test]
    fn test_invalid_base_uri_is_a_configuration_error() {
        let config = RestClientConfig::new("api.internal", 80);
        let err = config.endpoint_url().unwrap_err();
        assert!(matches!(err, RestClientError::Configuration(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let config = RestClientConfig::builder()
            .base_uri("http://api.internal")
            .base_port(8080)
            .build();
        assert_eq!(config.media_type, APPLICATION_JSON);
        assert!(config.normalize_status);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_deserializes_camel_case_keys() {
        let config: RestClientConfig = serde_json::from_str(
            r#"{"baseUri":"http://api.internal","basePort":8080,
                "credentials":{"username":"svc","password":"pw"}}"#,
        )
        .unwrap();
        assert_eq!(config.base_uri, "http://api.internal");
        assert_eq!(config.base_port, 8080);
        assert_eq!(config.credentials.unwrap().username, "svc");
        assert_eq!(config.media_type, APPLICATION_JSON);
        assert!(config.normalize_status);
    }
}
