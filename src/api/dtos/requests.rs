use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::user::Role;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub capacity: i64,
}

#[derive(Deserialize)]
pub struct SimulateParams {
    pub users: i64,
}
