//! Entity to model mappers
//!
//! - `From<Model> for Entity` / `TryFrom<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity data prepared for binding

mod message;
mod participant;

pub use message::MessageInsert;
