mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use tower::ServiceExt;

// Two participants: A books 2:00 PM, B hits the conflict, books 4:00 PM
// instead, and the occupancy reflects both.
#[tokio::test]
async fn test_conflicting_selection_reports_occupant_and_alternative_succeeds() {
    let app = TestApp::new();
    app.register("a@example.com", "Alice").await;
    app.register("b@example.com", "Bob").await;

    app.book("a@example.com", "2025-07-03", "2:00 PM").await;

    // B tries the same slot: stays Browsing, conflict names Alice.
    let (status, body) = app
        .post_json(
            "/api/v1/sessions/b@example.com/select-slot",
            json!({"date": "2025-07-03", "slot": "2:00 PM"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_state"]["name"], "BROWSING");
    assert_eq!(body["conflict"]["kind"], "SLOT_CONFLICT");
    assert_eq!(body["conflict"]["occupant"]["occupant_name"], "Alice");
    assert!(body["conflict"]["message"].as_str().unwrap().contains("Alice"));
    assert!(body["conflict"]["expires_in_ms"].as_u64().unwrap() > 0);

    // B picks 4:00 PM instead and commits.
    app.book("b@example.com", "2025-07-03", "4:00 PM").await;

    let (_, schedule) = app.get("/api/v1/schedule/2025-07-03").await;
    assert_eq!(schedule["status"], "OPEN");
    let slots = schedule["slots"].as_array().unwrap();
    let occupant_of = |label: &str| {
        slots.iter().find(|s| s["slot"] == label).unwrap()["occupant"].clone()
    };
    assert_eq!(occupant_of("2:00 PM"), "Alice");
    assert_eq!(occupant_of("4:00 PM"), "Bob");
    assert!(occupant_of("10:00 AM").is_null());
}

#[tokio::test]
async fn test_cancellation_frees_the_slot_for_rebooking() {
    let app = TestApp::new();
    app.register("a@example.com", "Alice").await;
    app.register("b@example.com", "Bob").await;

    app.book("a@example.com", "2025-07-03", "2:00 PM").await;

    let (status, body) = app.post("/api/v1/sessions/a@example.com/cancel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_state"]["name"], "BROWSING");

    // The slot is free again; B takes it.
    app.book("b@example.com", "2025-07-03", "2:00 PM").await;

    let (_, schedule) = app.get("/api/v1/schedule/2025-07-03").await;
    let slots = schedule["slots"].as_array().unwrap();
    let two_pm = slots.iter().find(|s| s["slot"] == "2:00 PM").unwrap();
    assert_eq!(two_pm["occupant"], "Bob");
}

#[tokio::test]
async fn test_cancellation_leaves_other_bookings_untouched() {
    let app = TestApp::new();
    app.register("a@example.com", "Alice").await;
    app.register("b@example.com", "Bob").await;
    app.book("a@example.com", "2025-07-03", "2:00 PM").await;
    app.book("b@example.com", "2025-07-03", "4:00 PM").await;

    app.post("/api/v1/sessions/a@example.com/cancel").await;

    let (_, bob) = app.get("/api/v1/participants/b@example.com").await;
    assert_eq!(bob["booking"]["status"], "ACTIVE");
    assert_eq!(bob["booking"]["slot"], "4:00 PM");

    let (_, alice) = app.get("/api/v1/participants/a@example.com").await;
    assert_eq!(alice["booking"]["status"], "UNBOOKED");
}

#[tokio::test]
async fn test_cancelled_booking_is_archived_not_lost() {
    let app = TestApp::new();
    app.register("a@example.com", "Alice").await;
    app.book("a@example.com", "2025-07-03", "2:00 PM").await;
    app.post("/api/v1/sessions/a@example.com/cancel").await;

    let (status, history) = app.get("/api/v1/participants/a@example.com/history").await;
    assert_eq!(status, StatusCode::OK);
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["reason"], "CANCELLED");
    assert_eq!(records[0]["date"], "2025-07-03");
    assert_eq!(records[0]["slot"], "2:00 PM");
}

#[tokio::test]
async fn test_ics_export_for_committed_booking() {
    let app = TestApp::new();
    app.register("a@example.com", "Alice").await;
    app.book("a@example.com", "2025-07-03", "2:00 PM").await;

    let res = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("GET")
                .uri("/api/v1/participants/a@example.com/calendar.ics")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/calendar"));
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let ics = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains("2:00 PM"));
}
