use registration_backend::{
    api::router::create_router,
    config::Config,
    domain::services::auth_service::AuthService,
    state::AppState,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_user_repo::SqliteUserRepo,
        sqlite_waitlist_repo::SqliteWaitlistRepo,
    },
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            waitlist_repo: Arc::new(SqliteWaitlistRepo::new(pool.clone())),
            auth_service: Arc::new(AuthService::new(&config)),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a user through the API and returns a bearer token for them.
    pub async fn register_and_login(&self, name: &str, email: &str, role: &str) -> String {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "name": name,
                    "email": email,
                    "password": "password123",
                    "role": role
                }).to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED, "register failed in test helper");

        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({
                    "email": email,
                    "password": "password123"
                }).to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "login failed in test helper");

        let body = parse_body(res).await;
        body["token"].as_str().expect("no token in login response").to_string()
    }

    pub async fn create_event(&self, token: &str, title: &str, capacity: i64, event_date: DateTime<Utc>) -> String {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/organizer/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(json!({
                    "title": title,
                    "description": "Test event",
                    "location": "Hall 1",
                    "event_date": event_date.to_rfc3339(),
                    "capacity": capacity
                }).to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED, "create_event failed in test helper");

        let body = parse_body(res).await;
        body["event"]["id"].as_str().unwrap().to_string()
    }

    pub async fn publish_event(&self, token: &str, event_id: &str) {
        let res = self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/organizer/events/{}/publish", event_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty()).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "publish_event failed in test helper");
    }

    pub async fn create_published_event(&self, token: &str, title: &str, capacity: i64, event_date: DateTime<Utc>) -> String {
        let event_id = self.create_event(token, title, capacity, event_date).await;
        self.publish_event(token, &event_id).await;
        event_id
    }

    pub async fn book(&self, token: &str, event_id: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/events/{}/register", event_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn cancel(&self, token: &str, registration_id: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/registrations/{}/cancel", registration_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn get_event(&self, token: &str, event_id: &str) -> Value {
        let res = self.router.clone().oneshot(
            Request::builder().method("GET")
                .uri(format!("/api/v1/events/{}", event_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty()).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "get_event failed in test helper");

        let body = parse_body(res).await;
        body["event"].clone()
    }

    pub async fn get_analytics(&self, token: &str, event_id: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("GET")
                .uri(format!("/api/v1/organizer/events/{}/analytics", event_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
