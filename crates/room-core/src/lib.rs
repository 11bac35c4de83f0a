//! # room-core
//!
//! Domain layer of the chat room: participants, the message log, the visibility
//! rule, the clock port and the repository traits the store adapters implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod clock;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;
pub mod visibility;

// Re-export commonly used types at crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{
    Message, MessageEdit, MessageKind, MessageKindParseError, NewMessage, Participant,
    BROADCAST_RECIPIENT, JOINED_TEXT, LEFT_TEXT,
};
pub use error::DomainError;
pub use traits::{MessageRepository, OwnedWrite, ParticipantRepository, RepoResult};
pub use value_objects::{require_text, sanitize, time_label, MessageId, MessageIdParseError};
pub use visibility::{visible, visible_messages};
