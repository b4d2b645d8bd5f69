//! Caller identity propagation.
//!
//! The hosting application holds identity in two shapes: a session-derived
//! auth user and a persisted user account. Both carry the same two facts —
//! a primary user id and a secondary emarkets account id — so they collapse
//! into one [`IdentityContext`] before being merged into request headers.

use http::{HeaderMap, HeaderName, HeaderValue};

/// Header carrying the caller's primary user id.
pub const HEADER_USER_ID: &str = "userid";

/// Header carrying the caller's secondary emarkets account id.
pub const HEADER_EMARKETS_ID: &str = "emarketsid";

/// Standard client-proxy forwarding header.
pub const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Caller identity propagated to the downstream service as headers.
///
/// Constructed per call by the caller from whichever identity shape it
/// holds; read-only to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
    /// Primary user id.
    pub user_id: Option<i64>,
    /// Secondary emarkets account id.
    pub emarkets_id: Option<String>,
}

impl IdentityContext {
    /// Create an identity context from both ids.
    pub fn new(user_id: i64, emarkets_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            emarkets_id: Some(emarkets_id.into()),
        }
    }

    /// Identity known only by its primary user id.
    pub fn from_user_id(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            emarkets_id: None,
        }
    }

    /// Identity known only by its emarkets account id.
    pub fn from_emarkets_id(emarkets_id: impl Into<String>) -> Self {
        Self {
            user_id: None,
            emarkets_id: Some(emarkets_id.into()),
        }
    }
}

/// Merge caller-supplied headers with derived identity headers.
///
/// Starts from a copy of `base` (or an empty map), then sets
/// `X-Forwarded-For`, `userId`, and `emarketsId` for whichever inputs are
/// present. Additive/overwriting only: a derived header wins when the
/// caller set the same key. Values that are not valid header text are
/// skipped.
pub(crate) fn combine_headers(
    base: Option<&HeaderMap>,
    forwarded_for: Option<&str>,
    user_id: Option<i64>,
    emarkets_id: Option<&str>,
) -> HeaderMap {
    let mut headers = base.cloned().unwrap_or_default();

    if let Some(forwarded) = forwarded_for
        && let Ok(value) = HeaderValue::from_str(forwarded)
    {
        headers.insert(HeaderName::from_static(HEADER_X_FORWARDED_FOR), value);
    }

    if let Some(id) = user_id
        && let Ok(value) = HeaderValue::from_str(&id.to_string())
    {
        headers.insert(HeaderName::from_static(HEADER_USER_ID), value);
    }

    if let Some(id) = emarkets_id
        && let Ok(value) = HeaderValue::from_str(id)
    {
        headers.insert(HeaderName::from_static(HEADER_EMARKETS_ID), value);
    }

    headers
}
