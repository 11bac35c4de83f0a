//! Ports implemented by the storage adapters

mod repositories;

pub use repositories::{MessageRepository, OwnedWrite, ParticipantRepository, RepoResult};
