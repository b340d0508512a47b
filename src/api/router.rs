use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, event, health, organizer, registration};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))

        // Audience
        .route("/api/v1/events", get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event))
        .route("/api/v1/events/{event_id}/register", post(registration::register_for_event))
        .route("/api/v1/registrations", get(registration::list_my_registrations))
        .route("/api/v1/registrations/{registration_id}/cancel", post(registration::cancel_registration))

        // Organizer
        .route("/api/v1/organizer/events", post(organizer::create_event).get(organizer::list_my_events))
        .route("/api/v1/organizer/events/{event_id}/publish", post(organizer::publish_event))
        .route("/api/v1/organizer/events/{event_id}/cancel", post(organizer::cancel_event))
        .route("/api/v1/organizer/events/{event_id}/analytics", get(organizer::get_analytics))

        // Admin
        .route("/api/v1/admin/events/{event_id}/simulate", post(admin::simulate_bookings))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
