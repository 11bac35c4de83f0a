//! Value objects - immutable domain primitives

mod message_id;
mod text;

pub use message_id::{MessageId, MessageIdParseError};
pub use text::{require_text, sanitize, time_label};
