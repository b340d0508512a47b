use crate::domain::models::{
    event::{Event, EventStatus},
    registration::{BookingOutcome, Registration, RegistrationStatus},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    /// Writes title, description, location, date and status. Never touches
    /// `capacity` or `seats_remaining`; the seat counter belongs to the
    /// booking unit of work.
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_status(&self, status: EventStatus) -> Result<Vec<Event>, AppError>;
    async fn list_by_organizer(&self, organizer_id: &str) -> Result<Vec<Event>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// One atomic unit of work: locks the event row first, so concurrent
    /// bookings for the same event serialize; either a seat is taken or a
    /// waitlist entry is appended, never both, never partially.
    async fn book_event(&self, user_id: &str, event_id: &str) -> Result<BookingOutcome, AppError>;
    /// One atomic unit of work under the same event lock as `book_event`:
    /// flips the registration to Cancelled, then either promotes the head of
    /// the waitlist (seat counter untouched) or frees the seat.
    async fn cancel_registration(&self, user_id: &str, registration_id: &str) -> Result<(), AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn count_by_event_and_status(&self, event_id: &str, status: RegistrationStatus) -> Result<i64, AppError>;
}

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
}
