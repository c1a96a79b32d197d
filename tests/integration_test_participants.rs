mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_and_fetch_participant() {
    let app = TestApp::new();
    app.register("alice@example.com", "Alice").await;

    let (status, body) = app.get("/api/v1/participants/alice@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["booking"]["status"], "UNBOOKED");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new();
    app.register("alice@example.com", "Alice").await;

    let (status, body) = app
        .post_json(
            "/api/v1/participants",
            json!({
                "email": "alice@example.com",
                "name": "Another Alice",
                "phone": "555-0101",
                "profession": "Doctor",
                "description": "Consults",
                "slots": "Weekends"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("alice@example.com"));
}

#[tokio::test]
async fn test_empty_fields_are_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .post_json(
            "/api/v1/participants",
            json!({
                "email": "  ",
                "name": "Alice",
                "phone": "",
                "profession": "",
                "description": "",
                "slots": ""
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_participant_is_idempotent() {
    let app = TestApp::new();
    app.register("alice@example.com", "Alice").await;

    let (status, _) = app.delete("/api/v1/participants/alice@example.com").await;
    assert_eq!(status, StatusCode::OK);

    // Removing again (or removing someone never registered) is a no-op.
    let (status, _) = app.delete("/api/v1/participants/alice@example.com").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.delete("/api/v1/participants/ghost@example.com").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/v1/participants/alice@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_participant_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/v1/participants/ghost@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost@example.com"));
}

#[tokio::test]
async fn test_admin_overview_lists_bookings() {
    let app = TestApp::new();
    app.register("alice@example.com", "Alice").await;
    app.register("bob@example.com", "Bob").await;
    app.book("alice@example.com", "2025-07-03", "2:00 PM").await;

    let (status, body) = app.get("/api/v1/participants").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let alice = rows.iter().find(|r| r["email"] == "alice@example.com").unwrap();
    assert_eq!(alice["status"], "ACTIVE");
    assert_eq!(alice["booking_date"], "2025-07-03");
    assert_eq!(alice["booking_slot"], "2:00 PM");
    assert_eq!(alice["slots"], "Mon-Fri 9am-5pm");

    let bob = rows.iter().find(|r| r["email"] == "bob@example.com").unwrap();
    assert_eq!(bob["status"], "UNBOOKED");
    assert!(bob["booking_date"].is_null());
    assert!(bob["booking_slot"].is_null());
}
