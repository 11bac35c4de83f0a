//! Domain entities - core business objects

mod message;
mod participant;

pub use message::{
    Message, MessageEdit, MessageKind, MessageKindParseError, NewMessage, BROADCAST_RECIPIENT,
    JOINED_TEXT, LEFT_TEXT,
};
pub use participant::Participant;
