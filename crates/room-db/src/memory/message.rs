//! In-memory implementation of MessageRepository

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use room_core::entities::{Message, MessageEdit, NewMessage};
use room_core::traits::{MessageRepository, OwnedWrite, RepoResult};
use room_core::value_objects::MessageId;

#[derive(Debug, Default)]
struct Log {
    last_id: MessageId,
    entries: BTreeMap<MessageId, Message>,
}

impl Log {
    fn append(&mut self, message: NewMessage) -> Message {
        self.last_id = self.last_id.next();
        let stored = message.with_id(self.last_id);
        self.entries.insert(stored.id, stored.clone());
        stored
    }

    /// Ownership guard shared by update and delete
    fn check_owner(&self, id: MessageId, from: &str) -> OwnedWrite<()> {
        match self.entries.get(&id) {
            None => OwnedWrite::Missing,
            Some(m) if m.is_from(from) && m.is_mutable() => OwnedWrite::Applied(()),
            Some(_) => OwnedWrite::NotOwner,
        }
    }
}

/// Message log ordered by ID
///
/// IDs are assigned under the write lock, so append order and ID order agree.
#[derive(Debug, Default)]
pub struct MemoryMessageRepository {
    log: RwLock<Log>,
}

impl MemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    #[instrument(skip(self, message), fields(from = %message.from, kind = %message.kind))]
    async fn insert(&self, message: NewMessage) -> RepoResult<Message> {
        Ok(self.log.write().append(message))
    }

    #[instrument(skip(self, messages), fields(count = messages.len()))]
    async fn insert_many(&self, messages: Vec<NewMessage>) -> RepoResult<Vec<Message>> {
        let mut log = self.log.write();
        Ok(messages.into_iter().map(|m| log.append(m)).collect())
    }

    async fn list(&self) -> RepoResult<Vec<Message>> {
        Ok(self.log.read().entries.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        Ok(self.log.read().entries.get(&id).cloned())
    }

    #[instrument(skip(self, edit))]
    async fn update_owned(
        &self,
        id: MessageId,
        from: &str,
        edit: &MessageEdit,
    ) -> RepoResult<OwnedWrite<Message>> {
        let mut log = self.log.write();
        Ok(match log.check_owner(id, from) {
            OwnedWrite::Applied(()) => match log.entries.get_mut(&id) {
                Some(message) => {
                    message.apply(edit);
                    OwnedWrite::Applied(message.clone())
                }
                None => OwnedWrite::Missing,
            },
            OwnedWrite::Missing => OwnedWrite::Missing,
            OwnedWrite::NotOwner => OwnedWrite::NotOwner,
        })
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: MessageId, from: &str) -> RepoResult<OwnedWrite<()>> {
        let mut log = self.log.write();
        let outcome = log.check_owner(id, from);
        if outcome.is_applied() {
            log.entries.remove(&id);
        }
        Ok(outcome)
    }
}
