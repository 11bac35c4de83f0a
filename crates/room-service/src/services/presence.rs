//! Presence service
//!
//! Join, heartbeat and expiry of room participants.

use chrono::{DateTime, Duration, Utc};
use room_core::entities::{NewMessage, Participant};
use room_core::{require_text, sanitize, DomainError};
use tracing::{error, info, instrument};

use crate::dto::{JoinRequest, ParticipantResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a participant and announce it with a `joined` status message
    ///
    /// The participant row is kept even if the announcement cannot be stored;
    /// that failure is still returned to the caller.
    #[instrument(skip(self, request))]
    pub async fn join(&self, request: JoinRequest) -> ServiceResult<ParticipantResponse> {
        let name = require_text("name", &request.name)?;
        let now = self.ctx.clock().now();
        let participant = Participant::new(name, now);

        self.ctx.participant_repo().insert(&participant).await?;

        if let Err(e) = self
            .ctx
            .message_repo()
            .insert(NewMessage::joined(&participant.name, now))
            .await
        {
            error!(name = %participant.name, error = %e, "Failed to record join notice");
            return Err(e.into());
        }

        info!(name = %participant.name, "Participant joined");

        Ok(ParticipantResponse::from(participant))
    }

    /// Renew the presence of `raw_name`
    #[instrument(skip(self))]
    pub async fn heartbeat(&self, raw_name: &str) -> ServiceResult<()> {
        let name = sanitize(raw_name);
        if name.is_empty() {
            return Err(DomainError::ParticipantNotFound(name).into());
        }

        let now = self.ctx.clock().now();
        if !self.ctx.participant_repo().touch(&name, now).await? {
            return Err(DomainError::ParticipantNotFound(name).into());
        }

        Ok(())
    }

    /// Every participant currently present
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<ParticipantResponse>> {
        let participants = self.ctx.participant_repo().list().await?;
        Ok(participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect())
    }

    /// Evict everyone last seen before `now - ttl` and append one `left`
    /// status message per evicted name
    ///
    /// The delete is a single conditional store call, so a name is returned by
    /// at most one concurrent sweep. If appending the notices fails the
    /// evictions stand and the error is returned.
    #[instrument(skip(self))]
    pub async fn sweep_expired(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> ServiceResult<Vec<String>> {
        let evicted = self
            .ctx
            .participant_repo()
            .delete_stale(now - ttl)
            .await?;

        if evicted.is_empty() {
            return Ok(evicted);
        }

        let notices = evicted
            .iter()
            .map(|name| NewMessage::left(name, now))
            .collect();

        if let Err(e) = self.ctx.message_repo().insert_many(notices).await {
            error!(
                evicted = ?evicted,
                error = %e,
                "Evicted participants but failed to record leave notices"
            );
            return Err(e.into());
        }

        info!(evicted = ?evicted, "Evicted stale participants");

        Ok(evicted)
    }
}
