use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::event::EventStatus;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_status(EventStatus::Published).await?;
    Ok(Json(serde_json::json!({ "events": events })))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(serde_json::json!({ "event": event })))
}
