//! Query string extractor for reading the log

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use room_service::dto::ReadMessagesQuery;

use crate::response::ApiError;

/// `?limit=` of `GET /messages`, kept raw so the service can judge it
#[derive(Debug, Clone, Default)]
pub struct ReadQuery(pub ReadMessagesQuery);

#[async_trait]
impl<S> FromRequestParts<S> for ReadQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ReadMessagesQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(ReadQuery(query))
    }
}
