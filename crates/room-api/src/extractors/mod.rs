//! Axum extractors for request handling
//!
//! Claimed identity, validated JSON bodies, path ids and the read query.

mod path;
mod query;
mod user;
mod validated;

pub use path::MessageIdPath;
pub use query::ReadQuery;
pub use user::{ClaimedUser, USER_HEADER};
pub use validated::ValidatedJson;
