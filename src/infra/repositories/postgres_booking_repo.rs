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
use sqlx::{PgPool, Row};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// SELECT ... FOR UPDATE on the event row is the serialization point: every
// unit of work that reads or writes seat counts for one event queues behind
// it, while units of work on other events proceed in parallel.
#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn book_event(&self, user_id: &str, event_id: &str) -> Result<BookingOutcome, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
            .bind(event_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        booking::ensure_bookable(&event, Utc::now())?;
        booking::validate_user_id(user_id)?;

        let already_registered = sqlx::query(
            "SELECT id FROM registrations WHERE event_id = $1 AND user_id = $2 AND status = $3"
        )
            .bind(event_id).bind(user_id).bind(RegistrationStatus::Confirmed.as_str())
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        if already_registered.is_some() {
            return Err(AppError::PreconditionFailed("Already registered for this event".into()));
        }

        let already_waitlisted = sqlx::query(
            "SELECT id FROM waitlist_entries WHERE event_id = $1 AND user_id = $2"
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
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING *"
            )
                .bind(&registration.id).bind(&registration.user_id).bind(&registration.event_id)
                .bind(registration.status.as_str()).bind(registration.created_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

            sqlx::query("UPDATE events SET seats_remaining = seats_remaining - 1, updated_at = $1 WHERE id = $2")
                .bind(Utc::now()).bind(event_id)
                .execute(&mut *tx).await.map_err(AppError::Database)?;

            BookingOutcome::Confirmed(created)
        } else {
            let count = sqlx::query("SELECT COUNT(*) as count FROM waitlist_entries WHERE event_id = $1")
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
                 VALUES ($1, $2, $3, $4, $5)
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
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let registration = sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = $1")
            .bind(registration_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Registration not found".into()))?;

        if registration.user_id != user_id {
            return Err(AppError::Forbidden("Not authorized to cancel this registration".into()));
        }
        if registration.status == RegistrationStatus::Cancelled {
            return Err(AppError::PreconditionFailed("Registration already cancelled".into()));
        }

        sqlx::query("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(&registration.event_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        // Guarded update: a concurrent cancellation of the same registration
        // may have committed while we waited on the event lock.
        let result = sqlx::query("UPDATE registrations SET status = $1 WHERE id = $2 AND status != $1")
            .bind(RegistrationStatus::Cancelled.as_str())
            .bind(registration_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::PreconditionFailed("Registration already cancelled".into()));
        }

        let next_in_line = sqlx::query_as::<_, WaitlistEntry>(
            "SELECT * FROM waitlist_entries WHERE event_id = $1 ORDER BY position ASC LIMIT 1"
        )
            .bind(&registration.event_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        match next_in_line {
            Some(entry) => {
                // The freed seat transfers straight to the promoted user, so
                // seats_remaining stays untouched.
                let promoted = Registration::new(entry.user_id.clone(), registration.event_id.clone());
                sqlx::query(
                    "INSERT INTO registrations (id, user_id, event_id, status, created_at) VALUES ($1, $2, $3, $4, $5)"
                )
                    .bind(&promoted.id).bind(&promoted.user_id).bind(&promoted.event_id)
                    .bind(promoted.status.as_str()).bind(promoted.created_at)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;

                sqlx::query("DELETE FROM waitlist_entries WHERE id = $1")
                    .bind(&entry.id)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;
            }
            None => {
                sqlx::query("UPDATE events SET seats_remaining = seats_remaining + 1, updated_at = $1 WHERE id = $2")
                    .bind(Utc::now()).bind(&registration.event_id)
                    .execute(&mut *tx).await.map_err(AppError::Database)?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = $1 ORDER BY created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_event_and_status(&self, event_id: &str, status: RegistrationStatus) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM registrations WHERE event_id = $1 AND status = $2")
            .bind(event_id).bind(status.as_str())
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
}
