use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{health, participant, schedule, session};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Participants (profile registration + admin overview)
        .route("/api/v1/participants", post(participant::register_participant).get(participant::list_participants))
        .route("/api/v1/participants/{email}", get(participant::get_participant).delete(participant::remove_participant))
        .route("/api/v1/participants/{email}/history", get(participant::booking_history))
        .route("/api/v1/participants/{email}/reminder", get(participant::reminder))
        .route("/api/v1/participants/{email}/calendar.ics", get(participant::export_ics))

        // Calendar
        .route("/api/v1/schedule/{date}", get(schedule::get_day_schedule))

        // Booking workflow sessions
        .route("/api/v1/sessions/{email}", get(session::get_snapshot))
        .route("/api/v1/sessions/{email}/select-date", post(session::select_date))
        .route("/api/v1/sessions/{email}/select-slot", post(session::select_slot))
        .route("/api/v1/sessions/{email}/commit", post(session::commit))
        .route("/api/v1/sessions/{email}/cancel", post(session::cancel))
        .route("/api/v1/sessions/{email}/finish", post(session::finish))
        .route("/api/v1/sessions/{email}/feedback", post(session::submit_feedback))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
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
                .on_failure(|failure: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", failure);
                })
        )
        .with_state(state)
}
