mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};
use tower::ServiceExt;

#[tokio::test]
async fn test_analytics_reports_counts_and_fill_percentage() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org@example.com", "ORGANIZER").await;
    let alice = app.register_and_login("Alice", "alice@example.com", "AUDIENCE").await;
    let bob = app.register_and_login("Bob", "bob@example.com", "AUDIENCE").await;
    let carol = app.register_and_login("Carol", "carol@example.com", "AUDIENCE").await;

    let event_id = app.create_published_event(&organizer, "Popular", 2, Utc::now() + Duration::days(7)).await;

    assert_eq!(app.book(&alice, &event_id).await.status(), StatusCode::CREATED);
    assert_eq!(app.book(&bob, &event_id).await.status(), StatusCode::CREATED);
    assert_eq!(app.book(&carol, &event_id).await.status(), StatusCode::OK);

    let res = app.get_analytics(&organizer, &event_id).await;
    assert_eq!(res.status(), StatusCode::OK);
    let analytics = parse_body(res).await["analytics"].clone();

    assert_eq!(analytics["confirmed_count"], 2);
    assert_eq!(analytics["waitlist_count"], 1);
    assert_eq!(analytics["total_registrations"], 3);
    assert!((analytics["seats_filled_percentage"].as_f64().unwrap() - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_analytics_requires_ownership() {
    let app = TestApp::new().await;
    let owner = app.register_and_login("Owner", "owner@example.com", "ORGANIZER").await;
    let other = app.register_and_login("Other", "other@example.com", "ORGANIZER").await;

    let event_id = app.create_published_event(&owner, "Private", 5, Utc::now() + Duration::days(7)).await;

    let res = app.get_analytics(&other, &event_id).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_simulation_fills_event_and_waitlists_overflow() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org2@example.com", "ORGANIZER").await;
    let admin = app.register_and_login("Admin", "admin@example.com", "ADMIN").await;

    let event_id = app.create_published_event(&organizer, "Load Test", 5, Utc::now() + Duration::days(7)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/admin/events/{}/simulate?users=8", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let results = parse_body(res).await["simulation_results"].clone();

    assert_eq!(results["total_attempted"], 8);
    assert_eq!(results["success_count"], 5);
    assert_eq!(results["waitlisted_count"], 3);
    assert_eq!(results["failed_count"], 0);
    assert_eq!(results["final_seats_remaining"], 0);
}

#[tokio::test]
async fn test_simulation_requires_admin_role() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org3@example.com", "ORGANIZER").await;

    let event_id = app.create_published_event(&organizer, "Load Test", 5, Utc::now() + Duration::days(7)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/admin/events/{}/simulate?users=3", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", organizer))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_simulation_rejects_invalid_user_count() {
    let app = TestApp::new().await;
    let organizer = app.register_and_login("Org", "org4@example.com", "ORGANIZER").await;
    let admin = app.register_and_login("Admin", "admin2@example.com", "ADMIN").await;

    let event_id = app.create_published_event(&organizer, "Load Test", 5, Utc::now() + Duration::days(7)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/admin/events/{}/simulate?users=0", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
