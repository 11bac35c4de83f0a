//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use room_core::entities::{Message, MessageEdit, NewMessage};
use room_core::traits::{MessageRepository, OwnedWrite, RepoResult};
use room_core::value_objects::MessageId;

use crate::mappers::MessageInsert;
use crate::models::MessageModel;

use super::error::map_db_error;

const INSERT_MESSAGE: &str = r#"
    INSERT INTO messages (sender, recipient, body, kind, time_label, created_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, sender, recipient, body, kind, time_label, created_at
"#;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tell a missing row from one whose guard failed
    async fn classify_miss<T>(&self, id: MessageId) -> RepoResult<OwnedWrite<T>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM messages WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(if exists {
            OwnedWrite::NotOwner
        } else {
            OwnedWrite::Missing
        })
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(from = %message.from, kind = %message.kind))]
    async fn insert(&self, message: NewMessage) -> RepoResult<Message> {
        let insert = MessageInsert::new(&message);
        let model = sqlx::query_as::<_, MessageModel>(INSERT_MESSAGE)
            .bind(insert.sender)
            .bind(insert.recipient)
            .bind(insert.body)
            .bind(insert.kind)
            .bind(insert.time_label)
            .bind(insert.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Message::try_from(model)
    }

    #[instrument(skip(self, messages), fields(count = messages.len()))]
    async fn insert_many(&self, messages: Vec<NewMessage>) -> RepoResult<Vec<Message>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut stored = Vec::with_capacity(messages.len());

        for message in &messages {
            let insert = MessageInsert::new(message);
            let model = sqlx::query_as::<_, MessageModel>(INSERT_MESSAGE)
                .bind(insert.sender)
                .bind(insert.recipient)
                .bind(insert.body)
                .bind(insert.kind)
                .bind(insert.time_label)
                .bind(insert.created_at)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;
            stored.push(Message::try_from(model)?);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender, recipient, body, kind, time_label, created_at
            FROM messages
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Message::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender, recipient, body, kind, time_label, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Message::try_from).transpose()
    }

    #[instrument(skip(self, edit))]
    async fn update_owned(
        &self,
        id: MessageId,
        from: &str,
        edit: &MessageEdit,
    ) -> RepoResult<OwnedWrite<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            UPDATE messages
            SET recipient = $3, body = $4, kind = $5, time_label = $6
            WHERE id = $1 AND sender = $2 AND kind <> 'status'
            RETURNING id, sender, recipient, body, kind, time_label, created_at
            "#,
        )
        .bind(id.into_inner())
        .bind(from)
        .bind(&edit.to)
        .bind(&edit.text)
        .bind(edit.kind.as_str())
        .bind(&edit.time)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(OwnedWrite::Applied(Message::try_from(model)?)),
            None => self.classify_miss(id).await,
        }
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: MessageId, from: &str) -> RepoResult<OwnedWrite<()>> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
            WHERE id = $1 AND sender = $2 AND kind <> 'status'
            "#,
        )
        .bind(id.into_inner())
        .bind(from)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return self.classify_miss(id).await;
        }

        Ok(OwnedWrite::Applied(()))
    }
}
