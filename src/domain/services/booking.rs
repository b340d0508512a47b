use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::event::{Event, EventStatus};
use crate::error::AppError;

/// Checks every repository backend applies, under the event lock, before
/// allocating a seat or a waitlist slot.
pub fn ensure_bookable(event: &Event, now: DateTime<Utc>) -> Result<(), AppError> {
    match event.status {
        EventStatus::Published => {}
        EventStatus::Draft | EventStatus::Cancelled => {
            return Err(AppError::PreconditionFailed("Event is not published".into()));
        }
    }

    if event.event_date < now {
        return Err(AppError::PreconditionFailed("Event has already passed".into()));
    }

    Ok(())
}

pub fn validate_user_id(user_id: &str) -> Result<(), AppError> {
    Uuid::parse_str(user_id)
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid user id".into()))
}

/// Positions strictly increase per event; the count is read under the same
/// event lock that guards the insert, so two entries can never tie.
pub fn next_waitlist_position(current_count: i64) -> i64 {
    current_count + 1
}
