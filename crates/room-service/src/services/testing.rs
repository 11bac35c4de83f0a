//! Store doubles shared by the service tests

use std::sync::Arc;

use async_trait::async_trait;
use room_core::entities::{Message, MessageEdit, NewMessage};
use room_core::traits::{MessageRepository, OwnedWrite, RepoResult};
use room_core::{Clock, DomainError, MessageId};
use room_db::{MemoryMessageRepository, MemoryParticipantRepository};

use super::context::ServiceContext;

/// Message log that reads fine but refuses every append
#[derive(Default)]
pub struct UnwritableLog {
    inner: MemoryMessageRepository,
}

fn refused() -> DomainError {
    DomainError::DatabaseError("message log is read-only".to_string())
}

#[async_trait]
impl MessageRepository for UnwritableLog {
    async fn insert(&self, _message: NewMessage) -> RepoResult<Message> {
        Err(refused())
    }

    async fn insert_many(&self, _messages: Vec<NewMessage>) -> RepoResult<Vec<Message>> {
        Err(refused())
    }

    async fn list(&self) -> RepoResult<Vec<Message>> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        self.inner.find_by_id(id).await
    }

    async fn update_owned(
        &self,
        id: MessageId,
        from: &str,
        edit: &MessageEdit,
    ) -> RepoResult<OwnedWrite<Message>> {
        self.inner.update_owned(id, from, edit).await
    }

    async fn delete_owned(&self, id: MessageId, from: &str) -> RepoResult<OwnedWrite<()>> {
        self.inner.delete_owned(id, from).await
    }
}

/// In-memory participants over a log that cannot be appended to
pub fn unwritable_log_context(clock: Arc<dyn Clock>) -> ServiceContext {
    ServiceContext::new(
        Arc::new(MemoryParticipantRepository::new()),
        Arc::new(UnwritableLog::default()),
        clock,
    )
}
