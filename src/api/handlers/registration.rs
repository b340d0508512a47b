use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::registration::BookingOutcome;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn register_for_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.booking_repo.book_event(&user.user_id, &event_id).await?;

    match outcome {
        BookingOutcome::Confirmed(registration) => {
            info!("User {} got a seat at event {}", user.user_id, event_id);
            Ok((StatusCode::CREATED, Json(serde_json::json!({
                "message": "Successfully registered for event",
                "registration": registration
            }))))
        }
        BookingOutcome::Waitlisted(entry) => {
            info!("User {} waitlisted at position {} for event {}", user.user_id, entry.position, event_id);
            Ok((StatusCode::OK, Json(serde_json::json!({
                "message": "Event is full. Added to waitlist.",
                "waitlist_entry": entry
            }))))
        }
    }
}

pub async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.cancel_registration(&user.user_id, &registration_id).await?;

    info!("Registration cancelled: {}", registration_id);

    Ok(Json(serde_json::json!({ "message": "Registration cancelled successfully" })))
}

pub async fn list_my_registrations(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.booking_repo.list_by_user(&user.user_id).await?;
    Ok(Json(serde_json::json!({ "registrations": registrations })))
}
