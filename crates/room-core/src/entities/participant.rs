//! Participant entity - a display name currently present in the room

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Participant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Sanitized display name, unique among active participants
    pub name: String,
    /// Last join or heartbeat
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    /// Create a new Participant seen at `now`
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_seen: now,
        }
    }

    /// Refresh the presence claim
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
    }

    /// Whether the presence has lapsed at `now` given `ttl`
    ///
    /// Strict: a participant seen exactly `ttl` ago is still present.
    #[inline]
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.last_seen < now - ttl
    }
}
