//! Test fixtures and data generators
//!
//! Request bodies the tests send and the shapes they read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A participant name no other test uses
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}

/// Join request
#[derive(Debug, Serialize)]
pub struct JoinBody {
    pub name: String,
}

impl JoinBody {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Send or edit request
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MessageBody {
    /// Message to everyone
    pub fn broadcast(text: &str) -> Self {
        Self {
            to: "everyone".to_string(),
            text: text.to_string(),
            kind: "message".to_string(),
        }
    }

    /// Private message to one participant
    pub fn private(to: &str, text: &str) -> Self {
        Self {
            to: to.to_string(),
            text: text.to_string(),
            kind: "private_message".to_string(),
        }
    }
}

/// Participant as returned by the API
#[derive(Debug, Deserialize)]
pub struct ParticipantJson {
    pub name: String,
    pub last_seen: chrono::DateTime<chrono::Utc>,
}

/// Message as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct MessageJson {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorJson {
    pub error: ErrorDetailJson,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailJson {
    pub code: String,
    pub message: String,
}
