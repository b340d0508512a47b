use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown event status: {0}")]
pub struct ParseEventStatusError(String);

impl TryFrom<String> for EventStatus {
    type Error = ParseEventStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "DRAFT" => Ok(EventStatus::Draft),
            "PUBLISHED" => Ok(EventStatus::Published),
            "CANCELLED" => Ok(EventStatus::Cancelled),
            _ => Err(ParseEventStatusError(value)),
        }
    }
}

/// `capacity` is fixed at creation. `seats_remaining` is only ever mutated
/// inside the per-event booking/cancellation unit of work.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub capacity: i64,
    pub seats_remaining: i64,
    pub organizer_id: String,
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub capacity: i64,
    pub organizer_id: String,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            location: params.location,
            event_date: params.event_date,
            capacity: params.capacity,
            seats_remaining: params.capacity,
            organizer_id: params.organizer_id,
            status: EventStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }
}
