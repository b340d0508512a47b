use crate::domain::models::{
    event::Event,
    registration::{BookingOutcome, Registration, RegistrationStatus},
    waitlist::WaitlistEntry,
};
use crate::domain::ports::BookingRepository;
use crate::domain::services::booking;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// SQLite has no row locks; an immediate transaction takes the database write
// lock up front, which serializes bookings across all events. That is a
// stricter ordering than the per-event lock the Postgres backend uses, and
// bounded by the pool's busy timeout.
#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn book_event(&self, user_id: &str, event_id: &str) -> Result<BookingOutcome, AppError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(AppError::Database)?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        booking::ensure_bookable(&event, Utc::now())?;
        booking::validate_user_id(user_id)?;

        let already_registered = sqlx::query(
            "SELECT id FROM registrations WHERE event_id = ? AND user_id = ? AND status = ?"
        )
            .bind(event_id).bind(user_id).bind(RegistrationStatus::Confirmed.as_str())
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if already_registered.is_some() {
            return Err(AppError::PreconditionFailed("Already registered for this event".into()));
        }

        let already_waitlisted = sqlx::query(
            "SELECT id FROM waitlist_entries WHERE event_id = ? AND user_id = ?"
        )
            .bind(event_id).bind(user_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if already_waitlisted.is_some() {
            return Err(AppError::PreconditionFailed("Already on the waitlist for this event".into()));
        }

        let outcome = if event.seats_remaining > 0 {
            let registration = Registration::new(user_id.to_string(), event_id.to_string());
            let created = sqlx::query_as::<_, Registration>(
                "INSERT INTO registrations (id, user_id, event_id, status, created_at)
                 VALUES (?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&registration.id).bind(&registration.user_id).bind(&registration.event_id)
                .bind(registration.status.as_str()).bind(registration.created_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

            sqlx::query("UPDATE events SET seats_remaining = seats_remaining - 1, updated_at = ? WHERE id = ?")
                .bind(Utc::now()).bind(event_id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;

            BookingOutcome::Confirmed(created)
        } else {
            let count = sqlx::query("SELECT COUNT(*) as count FROM waitlist_entries WHERE event_id = ?")
                .bind(event_id)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?
                .get::<i64, _>("count");

            let entry = WaitlistEntry::new(
                user_id.to_string(),
                event_id.to_string(),
                booking::next_waitlist_position(count),
            );
            let created = sqlx::query_as::<_, WaitlistEntry>(
                "INSERT INTO waitlist_entries (id, user_id, event_id, position, created_at)
                 VALUES (?, ?, ?, ?, ?)
                 RETURNING *"
            )
                .bind(&entry.id).bind(&entry.user_id).bind(&entry.event_id)
                .bind(entry.position).bind(entry.created_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

            BookingOutcome::Waitlisted(created)
        };

        tx.commit().await.map_err(AppError::Database)?;
        Ok(outcome)
    }

    async fn cancel_registration(&self, user_id: &str, registration_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(AppError::Database)?;

        let registration = sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = ?")
            .bind(registration_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Registration not found".into()))?;

        if registration.user_id != user_id {
            return Err(AppError::Forbidden("Not authorized to cancel this registration".into()));
        }
        if registration.status == RegistrationStatus::Cancelled {
            return Err(AppError::PreconditionFailed("Registration already cancelled".into()));
        }

        let result = sqlx::query("UPDATE registrations SET status = ? WHERE id = ? AND status != ?")
            .bind(RegistrationStatus::Cancelled.as_str())
            .bind(registration_id)
            .bind(RegistrationStatus::Cancelled.as_str())
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::PreconditionFailed("Registration already cancelled".into()));
        }

        let next_in_line = sqlx::query_as::<_, WaitlistEntry>(
            "SELECT * FROM waitlist_entries WHERE event_id = ? ORDER BY position ASC LIMIT 1"
        )
            .bind(&registration.event_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        match next_in_line {
            Some(entry) => {
                // The freed seat transfers straight to the promoted user, so
                // seats_remaining stays untouched.
                let promoted = Registration::new(entry.user_id.clone(), registration.event_id.clone());
                sqlx::query(
                    "INSERT INTO registrations (id, user_id, event_id, status, created_at) VALUES (?, ?, ?, ?, ?)"
                )
                    .bind(&promoted.id).bind(&promoted.user_id).bind(&promoted.event_id)
                    .bind(promoted.status.as_str()).bind(promoted.created_at)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;

                sqlx::query("DELETE FROM waitlist_entries WHERE id = ?")
                    .bind(&entry.id)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;
            }
            None => {
                sqlx::query("UPDATE events SET seats_remaining = seats_remaining + 1, updated_at = ? WHERE id = ?")
                    .bind(Utc::now()).bind(&registration.event_id)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = ? ORDER BY created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_event_and_status(&self, event_id: &str, status: RegistrationStatus) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE event_id = ? AND status = ?")
            .bind(event_id).bind(status.as_str())
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
}
