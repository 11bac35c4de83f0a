//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` for the duration of one
//! operation; the sweeper owns an `Arc` to it and runs on its own timer.

pub mod context;
pub mod error;
pub mod message;
pub mod presence;
pub mod sweeper;
#[cfg(test)]
mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use presence::PresenceService;
pub use sweeper::{Sweeper, SweeperHandle, SweeperSettings};
