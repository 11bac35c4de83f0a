//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every operation that has to be atomic
//! against concurrent requests is expressed as a single conditional write
//! here, so adapters never need a read-modify-write cycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Message, MessageEdit, NewMessage, Participant};
use crate::error::DomainError;
use crate::value_objects::MessageId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Outcome of a write guarded by message ownership
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedWrite<T> {
    /// The guard held and the write happened
    Applied(T),
    /// No message with that ID
    Missing,
    /// The message exists but the guard failed (other author, or a status notice)
    NotOwner,
}

impl<T> OwnedWrite<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

// ============================================================================
// Participant Repository
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a participant; `NameTaken` if the name is already present
    async fn insert(&self, participant: &Participant) -> RepoResult<()>;

    /// Find participant by name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>>;

    /// All current participants, ordered by name
    async fn list(&self) -> RepoResult<Vec<Participant>>;

    /// Set `last_seen` to `at`; false if the participant is absent
    async fn touch(&self, name: &str, at: DateTime<Utc>) -> RepoResult<bool>;

    /// Remove every participant with `last_seen < cutoff` and return their names
    async fn delete_stale(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<String>>;

    /// Round trip to the store for readiness checks
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message; the store assigns an ID greater than every previous one
    async fn insert(&self, message: NewMessage) -> RepoResult<Message>;

    /// Append several messages in order
    async fn insert_many(&self, messages: Vec<NewMessage>) -> RepoResult<Vec<Message>>;

    /// Whole log in append order
    async fn list(&self) -> RepoResult<Vec<Message>>;

    /// Find message by ID
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>>;

    /// Replace `to`, `text`, `type` and `time` when `from` authored a
    /// non-status message with this ID
    async fn update_owned(
        &self,
        id: MessageId,
        from: &str,
        edit: &MessageEdit,
    ) -> RepoResult<OwnedWrite<Message>>;

    /// Delete when `from` authored a non-status message with this ID
    async fn delete_owned(&self, id: MessageId, from: &str) -> RepoResult<OwnedWrite<()>>;
}
