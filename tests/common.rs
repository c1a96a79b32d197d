use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use smartbooking::{
    api::router::create_router,
    config::Config,
    domain::models::catalog::SlotCatalog,
    domain::services::temporal::local_today,
    infra::ledgers::memory_ledger::InMemoryLedger,
    infra::notify::log_notifier::LogReminderService,
    state::AppState,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Fixed catalog plus a few dates around "today" for reminder tests.
fn test_catalog() -> SlotCatalog {
    let slots = |labels: &[&str]| labels.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let mut days = BTreeMap::new();
    days.insert(date("2025-07-03"), slots(&["10:00 AM", "2:00 PM", "4:00 PM"]));
    days.insert(date("2025-07-04"), slots(&["10:00 AM", "2:00 PM"]));
    let today = local_today();
    for offset in 0..10u64 {
        if let Some(d) = today.checked_add_days(chrono::Days::new(offset)) {
            days.entry(d).or_insert_with(|| slots(&["9:00 AM", "11:00 AM"]));
        }
    }
    SlotCatalog::new(days)
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::default();
        let state = AppState::new(
            config,
            Arc::new(test_catalog()),
            Arc::new(InMemoryLedger::new()),
            Arc::new(LogReminderService::new()),
        );
        Self { router: create_router(Arc::new(state)) }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let res = self
            .router
            .clone()
            .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        (status, parse_body(res).await)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        (status, parse_body(res).await)
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        let res = self
            .router
            .clone()
            .oneshot(Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        (status, parse_body(res).await)
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let res = self
            .router
            .clone()
            .oneshot(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        (status, parse_body(res).await)
    }

    pub async fn register(&self, email: &str, name: &str) {
        let (status, body) = self
            .post_json(
                "/api/v1/participants",
                json!({
                    "email": email,
                    "name": name,
                    "phone": "555-0100",
                    "profession": "Coach",
                    "description": "Coaching sessions",
                    "slots": "Mon-Fri 9am-5pm"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    }

    /// Full select-and-commit cycle; asserts the commit landed.
    pub async fn book(&self, email: &str, day: &str, slot: &str) {
        let (status, body) = self
            .post_json(
                &format!("/api/v1/sessions/{}/select-slot", email),
                json!({"date": day, "slot": slot}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "select-slot failed: {}", body);
        let (status, body) = self.post(&format!("/api/v1/sessions/{}/commit", email)).await;
        assert_eq!(status, StatusCode::OK, "commit failed: {}", body);
        assert_eq!(body["current_state"]["name"], "COMMITTED", "not committed: {}", body);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
