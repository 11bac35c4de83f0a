//! # room-service
//!
//! Application layer containing the room's use cases, DTOs and the eviction sweeper.

pub mod dto;
pub mod services;

pub use services::{
    MessageService, PresenceService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, Sweeper, SweeperHandle, SweeperSettings,
};
