//! Message entity - one entry of the append-only chat log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{time_label, MessageId};

/// Recipient sentinel for messages addressed to the whole room
pub const BROADCAST_RECIPIENT: &str = "everyone";

/// Body of the status notice appended when a participant joins
pub const JOINED_TEXT: &str = "joined";

/// Body of the status notice appended when a participant is evicted
pub const LEFT_TEXT: &str = "left";

/// Message kind
///
/// Wire names follow the room protocol: `message`, `private_message`, `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Visible to everyone, whatever the recipient
    #[serde(rename = "message")]
    Broadcast,
    /// Visible to sender and recipient only
    #[serde(rename = "private_message")]
    Private,
    /// System-generated join/leave notice
    #[serde(rename = "status")]
    Status,
}

impl MessageKind {
    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Broadcast => "message",
            Self::Private => "private_message",
            Self::Status => "status",
        }
    }

    /// Kinds a participant may send, edit and delete
    #[inline]
    pub const fn is_user_authored(self) -> bool {
        !matches!(self, Self::Status)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a MessageKind from its wire name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type: {0}")]
pub struct MessageKindParseError(pub String);

impl std::str::FromStr for MessageKind {
    type Err = MessageKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Broadcast),
            "private_message" => Ok(Self::Private),
            "status" => Ok(Self::Status),
            other => Err(MessageKindParseError(other.to_string())),
        }
    }
}

/// Message entity as stored in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    /// `HH:MM:SS` captured when the entry was written
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Whether `name` authored this message
    #[inline]
    pub fn is_from(&self, name: &str) -> bool {
        self.from == name
    }

    /// Whether this message may be edited or deleted by its author
    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.kind.is_user_authored()
    }

    /// Apply an edit in place
    pub fn apply(&mut self, edit: &MessageEdit) {
        self.to.clone_from(&edit.to);
        self.text.clone_from(&edit.text);
        self.kind = edit.kind;
        self.time.clone_from(&edit.time);
    }
}

/// A message that has not been assigned an ID yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    /// A user-authored message written at `at`
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: time_label(at),
            created_at: at,
        }
    }

    /// Status notice for a participant that just joined
    pub fn joined(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(name, BROADCAST_RECIPIENT, JOINED_TEXT, MessageKind::Status, at)
    }

    /// Status notice for a participant that was evicted
    pub fn left(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(name, BROADCAST_RECIPIENT, LEFT_TEXT, MessageKind::Status, at)
    }

    /// Attach the store-assigned ID
    pub fn with_id(self, id: MessageId) -> Message {
        Message {
            id,
            from: self.from,
            to: self.to,
            text: self.text,
            kind: self.kind,
            time: self.time,
            created_at: self.created_at,
        }
    }
}

/// Replacement fields for an owner edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEdit {
    pub to: String,
    pub text: String,
    pub kind: MessageKind,
    pub time: String,
}

impl MessageEdit {
    pub fn new(
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageKind,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            to: to.into(),
            text: text.into(),
            kind,
            time: time_label(at),
        }
    }
}
