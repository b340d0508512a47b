use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use tracing::info;

use crate::domain::models::event::{Event, EventStatus, NewEventParams};
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::state::AppState;

const ADMIN_EMAIL: &str = "admin@eventhub.local";

/// Inserts sample users and events on first boot so the API is usable out of
/// the box. A re-run against a populated database is a no-op.
pub async fn seed_database(state: &AppState) -> Result<(), AppError> {
    if state.user_repo.find_by_email(ADMIN_EMAIL).await?.is_some() {
        info!("Database already contains data. Skipping seed.");
        return Ok(());
    }

    info!("Seeding database with sample users and events...");

    let admin = User::new("Super Admin".into(), ADMIN_EMAIL.into(), hash_password("admin123")?, Role::Admin);
    let organizer = User::new("TechCorp Conferences".into(), "events@techcorp.com".into(), hash_password("org123")?, Role::Organizer);
    let alice = User::new("Alice Student".into(), "alice@student.com".into(), hash_password("user123")?, Role::Audience);
    let bob = User::new("Bob Engineer".into(), "bob@engineer.com".into(), hash_password("user123")?, Role::Audience);

    state.user_repo.create(&admin).await?;
    let organizer = state.user_repo.create(&organizer).await?;
    state.user_repo.create(&alice).await?;
    state.user_repo.create(&bob).await?;

    let mut summit = Event::new(NewEventParams {
        title: "Rust Microservices Summit 2026".into(),
        description: "Advanced patterns for building highly scalable systems with Rust and Tokio.".into(),
        location: "Convention Center A".into(),
        event_date: Utc::now() + Duration::hours(24),
        capacity: 10,
        organizer_id: organizer.id.clone(),
    });
    summit.status = EventStatus::Published;

    let mut webinar = Event::new(NewEventParams {
        title: "Introduction to Row-Level Locking".into(),
        description: "How SELECT FOR UPDATE prevents race conditions inside explicit transactions.".into(),
        location: "Online Webinar".into(),
        event_date: Utc::now() + Duration::hours(72),
        capacity: 5,
        organizer_id: organizer.id.clone(),
    });
    webinar.status = EventStatus::Published;

    let draft = Event::new(NewEventParams {
        title: "Draft Event (Not Visible)".into(),
        description: "This event is still being planned.".into(),
        location: "TBD".into(),
        event_date: Utc::now() + Duration::hours(100),
        capacity: 100,
        organizer_id: organizer.id.clone(),
    });

    state.event_repo.create(&summit).await?;
    state.event_repo.create(&webinar).await?;
    state.event_repo.create(&draft).await?;

    info!("Database seeding completed successfully");
    Ok(())
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal)
}
