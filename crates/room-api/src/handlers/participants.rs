//! Participant handlers
//!
//! Joining the room and listing who is present.

use axum::{extract::State, Json};
use room_service::dto::{JoinRequest, ParticipantResponse};
use room_service::PresenceService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Join the room
///
/// POST /participants
pub async fn join(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<JoinRequest>,
) -> ApiResult<Created<Json<ParticipantResponse>>> {
    let service = PresenceService::new(state.service_context());
    let participant = service.join(request).await?;
    Ok(Created(Json(participant)))
}

/// List active participants
///
/// GET /participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ParticipantResponse>>> {
    let service = PresenceService::new(state.service_context());
    let participants = service.list_active().await?;
    Ok(Json(participants))
}
