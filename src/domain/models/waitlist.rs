use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// `position` is assigned once at enqueue time and never renumbered; the
/// entry with the smallest position for an event is the next to be promoted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WaitlistEntry {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(user_id: String, event_id: String, position: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            position,
            created_at: Utc::now(),
        }
    }
}
