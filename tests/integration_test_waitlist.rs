mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use tower::ServiceExt;

async fn my_registrations(app: &TestApp, token: &str) -> serde_json::Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/registrations")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["registrations"].clone()
}

#[tokio::test]
async fn test_cancellation_promotes_waitlist_head_without_freeing_seat() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org@example.com", "ORGANIZER").await;
    let holder = app.register_and_login("Holder", "holder@example.com", "AUDIENCE").await;
    let waiting = app.register_and_login("Waiting", "waiting@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Tiny", 1, Utc::now() + Duration::days(7)).await;

    let res = app.book(&holder, &event_id).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let registration_id = parse_body(res).await["registration"]["id"].as_str().unwrap().to_string();

    let res = app.book(&waiting, &event_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.cancel(&holder, &registration_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    // The seat transfers to the promoted user; the counter never bounces.
    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 0);

    let regs = my_registrations(&app, &waiting).await;
    assert_eq!(regs.as_array().unwrap().len(), 1);
    assert_eq!(regs[0]["status"], "CONFIRMED");

    let res = app.get_analytics(&organizer, &event_id).await;
    let analytics = parse_body(res).await["analytics"].clone();
    assert_eq!(analytics["confirmed_count"], 1);
    assert_eq!(analytics["waitlist_count"], 0);
}

#[tokio::test]
async fn test_cancellation_with_empty_waitlist_frees_the_seat() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org2@example.com", "ORGANIZER").await;
    let audience = app.register_and_login("Solo", "solo@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Roomy", 2, Utc::now() + Duration::days(7)).await;

    let res = app.book(&audience, &event_id).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let registration_id = parse_body(res).await["registration"]["id"].as_str().unwrap().to_string();

    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 1);

    let res = app.cancel(&audience, &registration_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 2);
}

#[tokio::test]
async fn test_promotion_is_first_come_first_served() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org3@example.com", "ORGANIZER").await;
    let holder = app.register_and_login("Holder", "holder3@example.com", "AUDIENCE").await;
    let early = app.register_and_login("Early", "early@example.com", "AUDIENCE").await;
    let late = app.register_and_login("Late", "late@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Tiny", 1, Utc::now() + Duration::days(7)).await;

    let res = app.book(&holder, &event_id).await;
    let holder_reg = parse_body(res).await["registration"]["id"].as_str().unwrap().to_string();

    app.book(&early, &event_id).await;
    app.book(&late, &event_id).await;

    let res = app.cancel(&holder, &holder_reg).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Early joined the waitlist first, so early gets the seat.
    let early_regs = my_registrations(&app, &early).await;
    assert_eq!(early_regs.as_array().unwrap().len(), 1);
    let late_regs = my_registrations(&app, &late).await;
    assert_eq!(late_regs.as_array().unwrap().len(), 0);

    // Cancelling the promoted registration promotes the next in line.
    let early_reg = early_regs[0]["id"].as_str().unwrap().to_string();
    let res = app.cancel(&early, &early_reg).await;
    assert_eq!(res.status(), StatusCode::OK);

    let late_regs = my_registrations(&app, &late).await;
    assert_eq!(late_regs.as_array().unwrap().len(), 1);
    assert_eq!(late_regs[0]["status"], "CONFIRMED");

    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 0);
}

#[tokio::test]
async fn test_cancelling_twice_fails() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org4@example.com", "ORGANIZER").await;
    let audience = app.register_and_login("Aud", "aud4@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Meetup", 2, Utc::now() + Duration::days(7)).await;

    let res = app.book(&audience, &event_id).await;
    let registration_id = parse_body(res).await["registration"]["id"].as_str().unwrap().to_string();

    let res = app.cancel(&audience, &registration_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.cancel(&audience, &registration_id).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The second cancellation must not free another seat.
    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 2);
}

#[tokio::test]
async fn test_cannot_cancel_someone_elses_registration() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org5@example.com", "ORGANIZER").await;
    let owner = app.register_and_login("Owner", "owner@example.com", "AUDIENCE").await;
    let intruder = app.register_and_login("Intruder", "intruder@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Meetup", 2, Utc::now() + Duration::days(7)).await;

    let res = app.book(&owner, &event_id).await;
    let registration_id = parse_body(res).await["registration"]["id"].as_str().unwrap().to_string();

    let res = app.cancel(&intruder, &registration_id).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let event = app.get_event(&organizer, &event_id).await;
    assert_eq!(event["seats_remaining"], 1, "rejected cancellation must not touch the seat count");
}

#[tokio::test]
async fn test_cancelling_unknown_registration_returns_404() {
    let app = TestApp::new().await;
    let audience = app.register_and_login("Aud", "aud6@example.com", "AUDIENCE").await;

    let res = app.cancel(&audience, "no-such-registration").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
