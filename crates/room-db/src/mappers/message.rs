//! Message entity <-> model mapper

use chrono::{DateTime, Utc};
use room_core::entities::{Message, NewMessage};
use room_core::error::DomainError;
use room_core::value_objects::MessageId;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
///
/// Fails only if the row carries a `kind` outside the known set.
impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let kind = model
            .kind
            .parse()
            .map_err(|e| DomainError::DatabaseError(format!("message {}: {e}", model.id)))?;

        Ok(Message {
            id: MessageId::new(model.id),
            from: model.sender,
            to: model.recipient,
            text: model.body,
            kind,
            time: model.time_label,
            created_at: model.created_at,
        })
    }
}

/// NewMessage values for database insertion
pub struct MessageInsert<'a> {
    pub sender: &'a str,
    pub recipient: &'a str,
    pub body: &'a str,
    pub kind: &'static str,
    pub time_label: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a NewMessage) -> Self {
        Self {
            sender: &message.from,
            recipient: &message.to,
            body: &message.text,
            kind: message.kind.as_str(),
            time_label: &message.time,
            created_at: message.created_at,
        }
    }
}
