use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::waitlist::WaitlistEntry;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "CONFIRMED",
            RegistrationStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown registration status: {0}")]
pub struct ParseRegistrationStatusError(String);

impl TryFrom<String> for RegistrationStatus {
    type Error = ParseRegistrationStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "CONFIRMED" => Ok(RegistrationStatus::Confirmed),
            "CANCELLED" => Ok(RegistrationStatus::Cancelled),
            _ => Err(ParseRegistrationStatusError(value)),
        }
    }
}

/// Registrations are never deleted; cancellation flips the status and keeps
/// the row as history. Only one non-cancelled row may exist per (user, event).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    #[sqlx(try_from = "String")]
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(user_id: String, event_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            status: RegistrationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }
}

/// Result of a booking attempt. Both variants are successes; the caller
/// messages the user differently depending on which one it got.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Confirmed(Registration),
    Waitlisted(WaitlistEntry),
}
