//! Claimed identity extractor
//!
//! Reads the `user` header. The value is a claim, not a credential; the
//! services sanitize it and decide what a missing one means.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the caller's claimed participant name
pub const USER_HEADER: &str = "user";

/// Raw value of the `user` header, empty when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimedUser(pub String);

impl ClaimedUser {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClaimedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        Ok(ClaimedUser(value))
    }
}
