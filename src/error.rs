//! REST client error types.

use thiserror::Error;

use crate::status::NormalizedStatus;

/// Result type for REST client operations.
pub type Result<T> = std::result::Result<T, RestClientError>;

/// REST client errors.
#[derive(Debug, Error)]
pub enum RestClientError {
    /// Invalid or incomplete client configuration. Fatal at construction.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// Connection or I/O failure while sending the request.
    #[error("Transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other failure while building or dispatching the request.
    #[error("Unexpected client failure: {0}")]
    Unexpected(String),

    /// Downstream returned a non-OK normalized status.
    #[error("Downstream returned {status} (HTTP {code})")]
    RemoteStatus {
        /// Normalized status category.
        status: NormalizedStatus,
        /// Raw HTTP status code.
        code: u16,
    },

    /// Malformed JSON, a body that does not fit the target shape, or a
    /// read failure while decoding.
    #[error("{message}")]
    Json {
        /// Human-readable description including the failed target shape.
        message: String,
        /// Underlying decode error, if one exists.
        #[source]
        cause: Option<serde_json::Error>,
    },
}

impl RestClientError {
    /// Classify a dispatch-time reqwest error.
    ///
    /// Connection, timeout, and body I/O faults are transport failures;
    /// everything else (malformed request, redirect loop) is unexpected.
    pub(crate) fn from_dispatch(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() || error.is_body() || error.is_request() {
            Self::Transport(error)
        } else {
            Self::Unexpected(error.to_string())
        }
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a JSON decode failure.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json { .. })
    }

    /// Get the normalized status if the downstream rejected the request.
    pub fn normalized_status(&self) -> Option<NormalizedStatus> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the raw HTTP status code if this is a remote status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_accessors() {
        let err = RestClientError::RemoteStatus {
            status: NormalizedStatus::NotFound,
            code: 404,
        };
        assert_eq!(err.normalized_status(), Some(NormalizedStatus::NotFound));
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_json_error_message() {
        let err = RestClientError::Json {
            message: "Unable to parse JSON".to_string(),
            cause: None,
        };
        assert!(err.is_json());
        assert_eq!(err.to_string(), "Unable to parse JSON");
        assert!(err.normalized_status().is_none());
    }

    #[test]
    fn test_configuration_error_display() {
        let err = RestClientError::Configuration("basePort missing".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid client configuration: basePort missing"
        );
    }
}
