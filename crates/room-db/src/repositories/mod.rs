//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in room-core.

mod error;
mod message;
mod participant;

pub use message::PgMessageRepository;
pub use participant::PgParticipantRepository;
