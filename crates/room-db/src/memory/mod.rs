//! In-memory repository implementations
//!
//! Process-local stores with the same conditional-write semantics as the
//! PostgreSQL adapters. Used by tests and by `STORE_BACKEND=memory`.

mod message;
mod participant;

pub use message::MemoryMessageRepository;
pub use participant::MemoryParticipantRepository;
