//! In-memory implementation of ParticipantRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use room_core::entities::Participant;
use room_core::error::DomainError;
use room_core::traits::{ParticipantRepository, RepoResult};

/// Participants keyed by name
#[derive(Debug, Default)]
pub struct MemoryParticipantRepository {
    participants: DashMap<String, Participant>,
}

impl MemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for MemoryParticipantRepository {
    #[instrument(skip(self))]
    async fn insert(&self, participant: &Participant) -> RepoResult<()> {
        match self.participants.entry(participant.name.clone()) {
            Entry::Occupied(_) => Err(DomainError::NameTaken(participant.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(participant.clone());
                Ok(())
            }
        }
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>> {
        Ok(self.participants.get(name).map(|p| p.value().clone()))
    }

    async fn list(&self) -> RepoResult<Vec<Participant>> {
        let mut all: Vec<Participant> = self
            .participants
            .iter()
            .map(|p| p.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn touch(&self, name: &str, at: DateTime<Utc>) -> RepoResult<bool> {
        Ok(self
            .participants
            .get_mut(name)
            .map(|mut p| p.touch(at))
            .is_some())
    }

    #[instrument(skip(self))]
    async fn delete_stale(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<String>> {
        let mut evicted = Vec::new();
        self.participants.retain(|name, p| {
            let stale = p.last_seen < cutoff;
            if stale {
                evicted.push(name.clone());
            }
            !stale
        });
        evicted.sort();
        Ok(evicted)
    }
}
