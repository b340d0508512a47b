use crate::domain::{models::event::{Event, EventStatus}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, location, event_date, capacity, seats_remaining, organizer_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description).bind(&event.location)
            .bind(event.event_date).bind(event.capacity).bind(event.seats_remaining)
            .bind(&event.organizer_id).bind(event.status.as_str())
            .bind(event.created_at).bind(event.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    // seats_remaining is deliberately absent: the struct may hold a stale
    // count read outside the event lock, and writing it back here would
    // clobber a concurrent booking.
    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = $1, description = $2, location = $3, event_date = $4, status = $5, updated_at = $6
             WHERE id = $7
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(&event.location)
            .bind(event.event_date).bind(event.status.as_str()).bind(Utc::now())
            .bind(&event.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_status(&self, status: EventStatus) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE status = $1 ORDER BY event_date ASC")
            .bind(status.as_str())
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE organizer_id = $1 ORDER BY event_date ASC")
            .bind(organizer_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
