//! # room-db
//!
//! Storage layer implementing the room-core repository traits.
//!
//! ## Overview
//!
//! Two interchangeable backends:
//!
//! - PostgreSQL via SQLx (`PgParticipantRepository`, `PgMessageRepository`)
//! - In-process maps (`MemoryParticipantRepository`, `MemoryMessageRepository`)
//!   for tests and single-node development
//!
//! ## Usage
//!
//! ```rust,ignore
//! use room_db::pool::{create_pool, ensure_schema, DatabaseConfig};
//! use room_db::repositories::PgParticipantRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     ensure_schema(&pool).await?;
//!     let participants = PgParticipantRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryMessageRepository, MemoryParticipantRepository};
pub use pool::{create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{PgMessageRepository, PgParticipantRepository};
