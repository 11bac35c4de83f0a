//! Message service
//!
//! Handles sending, reading, editing and deleting entries of the room log.

use room_core::entities::{MessageEdit, MessageKind, NewMessage, BROADCAST_RECIPIENT};
use room_core::traits::OwnedWrite;
use room_core::{require_text, sanitize, visible_messages, DomainError, MessageId};
use tracing::{info, instrument};

use crate::dto::{EditMessageRequest, MessageResponse, ReadMessagesQuery, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Sanitized `to`, `text` and kind shared by send and edit
struct Fields {
    to: String,
    text: String,
    kind: MessageKind,
}

impl Fields {
    fn parse(to: &str, text: &str, kind: &str) -> Result<Self, DomainError> {
        let to = require_text("to", to)?;
        let text = require_text("text", text)?;
        let kind = match kind.trim() {
            "message" => MessageKind::Broadcast,
            "private_message" => MessageKind::Private,
            other => {
                return Err(DomainError::ValidationError(format!(
                    "type must be message or private_message, got {other:?}"
                )))
            }
        };

        if kind == MessageKind::Private && to == BROADCAST_RECIPIENT {
            return Err(DomainError::ValidationError(format!(
                "private_message cannot be addressed to {BROADCAST_RECIPIENT}"
            )));
        }

        Ok(Self { to, text, kind })
    }
}

/// Sanitized claimed identity from the `user` header
fn claimed_user(raw: &str) -> ServiceResult<String> {
    let user = sanitize(raw);
    if user.is_empty() {
        return Err(ServiceError::validation("user header is required"));
    }
    Ok(user)
}

/// Parse the optional `limit` query value
///
/// Absent means no cap; present must be an integer of at least 1.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<usize>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(DomainError::InvalidLimit(raw.to_string())),
    }
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a user-authored message from an active participant
    ///
    /// The sender check is a read before the write; a participant evicted
    /// between the two can still land one message.
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        raw_from: &str,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let from = claimed_user(raw_from)?;
        let fields = Fields::parse(&request.to, &request.text, &request.kind)?;

        if self
            .ctx
            .participant_repo()
            .find_by_name(&from)
            .await?
            .is_none()
        {
            return Err(DomainError::SenderNotActive(from).into());
        }

        let now = self.ctx.clock().now();
        let message = self
            .ctx
            .message_repo()
            .insert(NewMessage::new(from, fields.to, fields.text, fields.kind, now))
            .await?;

        info!(message_id = %message.id, from = %message.from, kind = %message.kind, "Message sent");

        Ok(MessageResponse::from(message))
    }

    /// Messages `raw_viewer` may see, most recent first
    #[instrument(skip(self))]
    pub async fn read(
        &self,
        raw_viewer: &str,
        query: &ReadMessagesQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let viewer = claimed_user(raw_viewer)?;
        let limit = parse_limit(query.limit.as_deref())?;

        let log = self.ctx.message_repo().list().await?;

        Ok(visible_messages(log, &viewer, limit)
            .into_iter()
            .map(MessageResponse::from)
            .collect())
    }

    /// Replace `to`, `text` and `type` of a message owned by `raw_from`
    ///
    /// The new fields pass the same checks as a send. The editor does not need
    /// to be present any more, only to be the author.
    #[instrument(skip(self, request))]
    pub async fn edit(
        &self,
        id: MessageId,
        raw_from: &str,
        request: EditMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let from = claimed_user(raw_from)?;
        let fields = Fields::parse(&request.to, &request.text, &request.kind)?;
        let edit = MessageEdit::new(fields.to, fields.text, fields.kind, self.ctx.clock().now());

        match self
            .ctx
            .message_repo()
            .update_owned(id, &from, &edit)
            .await?
        {
            OwnedWrite::Applied(message) => {
                info!(message_id = %id, from = %from, "Message edited");
                Ok(MessageResponse::from(message))
            }
            OwnedWrite::Missing => Err(DomainError::MessageNotFound(id).into()),
            OwnedWrite::NotOwner => Err(self.rejection(id).await),
        }
    }

    /// Delete a message owned by `raw_from`
    #[instrument(skip(self))]
    pub async fn delete(&self, id: MessageId, raw_from: &str) -> ServiceResult<()> {
        let from = claimed_user(raw_from)?;

        match self.ctx.message_repo().delete_owned(id, &from).await? {
            OwnedWrite::Applied(()) => {
                info!(message_id = %id, from = %from, "Message deleted");
                Ok(())
            }
            OwnedWrite::Missing => Err(DomainError::MessageNotFound(id).into()),
            OwnedWrite::NotOwner => Err(self.rejection(id).await),
        }
    }

    /// Explain why an owned write did not apply
    async fn rejection(&self, id: MessageId) -> ServiceError {
        match self.ctx.message_repo().find_by_id(id).await {
            Ok(Some(message)) if !message.is_mutable() => DomainError::StatusImmutable.into(),
            Ok(Some(_)) => DomainError::NotMessageAuthor.into(),
            // Deleted in between
            Ok(None) => DomainError::MessageNotFound(id).into(),
            Err(e) => e.into(),
        }
    }
}
