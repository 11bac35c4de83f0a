//! Route definitions
//!
//! Room routes are mounted at the root. Health routes are kept apart so
//! they can skip rate limiting.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, messages, participants, status};
use crate::state::AppState;

/// Create the room router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(participant_routes())
        .merge(message_routes())
        .route("/status", post(status::heartbeat))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn participant_routes() -> Router<AppState> {
    Router::new().route(
        "/participants",
        post(participants::join).get(participants::list_participants),
    )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::get_messages).post(messages::send_message),
        )
        .route(
            "/messages/:id",
            put(messages::edit_message).delete(messages::delete_message),
        )
}
