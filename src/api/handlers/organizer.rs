use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateEventRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::event::{Event, EventStatus, NewEventParams};
use crate::domain::models::registration::RegistrationStatus;
use crate::domain::models::user::Role;
use crate::domain::services::analytics::EventAnalytics;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

const ORGANIZER_ROLES: &[Role] = &[Role::Organizer, Role::Admin];

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require(ORGANIZER_ROLES)?;

    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if payload.capacity < 0 {
        return Err(AppError::Validation("Capacity must not be negative".into()));
    }

    let event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description.unwrap_or_default(),
        location: payload.location.unwrap_or_default(),
        event_date: payload.event_date,
        capacity: payload.capacity,
        organizer_id: user.user_id.clone(),
    });
    let created = state.event_repo.create(&event).await?;

    info!("Event created in draft: {} by {}", created.id, user.user_id);

    Ok((StatusCode::CREATED, Json(serde_json::json!({
        "message": "Event created in Draft status",
        "event": created
    }))))
}

pub async fn list_my_events(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    user.require(ORGANIZER_ROLES)?;

    let events = state.event_repo.list_by_organizer(&user.user_id).await?;
    Ok(Json(serde_json::json!({ "events": events })))
}

pub async fn publish_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require(ORGANIZER_ROLES)?;

    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.user_id {
        return Err(AppError::Forbidden("You do not own this event".into()));
    }

    match event.status {
        EventStatus::Draft => {}
        EventStatus::Published | EventStatus::Cancelled => {
            return Err(AppError::PreconditionFailed("Event is not in draft status".into()));
        }
    }

    event.status = EventStatus::Published;
    let updated = state.event_repo.update(&event).await?;

    info!("Event published: {}", updated.id);

    Ok(Json(serde_json::json!({ "message": "Event published successfully" })))
}

pub async fn cancel_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require(ORGANIZER_ROLES)?;

    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.user_id {
        return Err(AppError::Forbidden("You do not own this event".into()));
    }

    event.status = EventStatus::Cancelled;
    let updated = state.event_repo.update(&event).await?;

    info!("Event cancelled: {}", updated.id);

    Ok(Json(serde_json::json!({ "message": "Event cancelled successfully" })))
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require(ORGANIZER_ROLES)?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if event.organizer_id != user.user_id {
        return Err(AppError::Forbidden("You do not own this event".into()));
    }

    let confirmed = state.booking_repo
        .count_by_event_and_status(&event.id, RegistrationStatus::Confirmed).await?;
    let waitlisted = state.waitlist_repo.count_by_event(&event.id).await?;

    let analytics = EventAnalytics::compute(&event, confirmed, waitlisted);

    Ok(Json(serde_json::json!({ "analytics": analytics })))
}
