//! Normalized HTTP status classification.

use http::StatusCode;

/// Coarse classification of a downstream HTTP status.
///
/// The calling application only distinguishes "permission", "missing
/// resource", and "transient failure" classes. All 4xx codes other than
/// 403 and 404 (validation errors included) deliberately fold into
/// [`NormalizedStatus::ServiceUnavailable`] so callers lean on retry or
/// backoff instead of fine-grained handling. Calling code depends on this
/// coarse mapping; do not refine it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedStatus {
    /// 1xx, 2xx, and 3xx responses.
    Ok,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// Any other 4xx, and all 5xx.
    ServiceUnavailable,
    /// A status outside the known families.
    InternalError,
}

impl NormalizedStatus {
    /// Classify a raw HTTP status code.
    pub fn from_code(code: u16) -> Self {
        match code {
            100..=399 => Self::Ok,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400..=499 => Self::ServiceUnavailable,
            500..=599 => Self::ServiceUnavailable,
            _ => Self::InternalError,
        }
    }

    /// Check whether the downstream call counts as successful.
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<StatusCode> for NormalizedStatus {
    fn from(status: StatusCode) -> Self {
        Self::from_code(status.as_u16())
    }
}

impl std::fmt::Display for NormalizedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", name)
    }
}
