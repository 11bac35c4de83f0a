//! Message handlers
//!
//! Endpoints for the shared message log. The sender or viewer is always the
//! claimed `user` header.

use axum::{extract::State, Json};
use room_service::dto::{EditMessageRequest, MessageResponse, SendMessageRequest};
use room_service::MessageService;

use crate::extractors::{ClaimedUser, MessageIdPath, ReadQuery, ValidatedJson};
use crate::response::{ApiResult, Created, EmptyOk};
use crate::state::AppState;

/// Read visible messages, most recent first
///
/// GET /messages?limit=
pub async fn get_messages(
    State(state): State<AppState>,
    user: ClaimedUser,
    ReadQuery(query): ReadQuery,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.read(user.as_str(), &query).await?;
    Ok(Json(messages))
}

/// Send a message
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    user: ClaimedUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let message = service.send(user.as_str(), request).await?;
    Ok(Created(Json(message)))
}

/// Edit one of the caller's messages
///
/// PUT /messages/:id
pub async fn edit_message(
    State(state): State<AppState>,
    MessageIdPath(id): MessageIdPath,
    user: ClaimedUser,
    ValidatedJson(request): ValidatedJson<EditMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let message = service.edit(id, user.as_str(), request).await?;
    Ok(Json(message))
}

/// Delete one of the caller's messages
///
/// DELETE /messages/:id
pub async fn delete_message(
    State(state): State<AppState>,
    MessageIdPath(id): MessageIdPath,
    user: ClaimedUser,
) -> ApiResult<EmptyOk> {
    MessageService::new(state.service_context())
        .delete(id, user.as_str())
        .await?;
    Ok(EmptyOk)
}
