//! Heartbeat handler

use axum::extract::State;
use room_service::PresenceService;

use crate::extractors::ClaimedUser;
use crate::response::{ApiResult, EmptyOk};
use crate::state::AppState;

/// Renew the caller's presence
///
/// POST /status
pub async fn heartbeat(State(state): State<AppState>, user: ClaimedUser) -> ApiResult<EmptyOk> {
    PresenceService::new(state.service_context())
        .heartbeat(user.as_str())
        .await?;
    Ok(EmptyOk)
}
