//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
///
/// Column names avoid the SQL keywords `from`, `to` and `type`.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub body: String,
    pub kind: String,
    pub time_label: String,
    pub created_at: DateTime<Utc>,
}
