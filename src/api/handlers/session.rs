use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{FeedbackRequest, SelectDateRequest, SelectSlotRequest};
use crate::domain::services::workflow::BookingWorkflow;
use crate::error::AppError;
use crate::state::AppState;

/// Fetches the participant's workflow, starting a fresh one on first touch.
/// Callers hold the session-table lock for the whole transition, so actions
/// within one session run strictly one after another.
async fn session_for<'a>(
    state: &AppState,
    sessions: &'a mut HashMap<String, BookingWorkflow>,
    email: &str,
) -> Result<&'a mut BookingWorkflow, AppError> {
    if !sessions.contains_key(email) {
        let workflow = BookingWorkflow::start(
            email,
            None,
            state.catalog.clone(),
            state.ledger.clone(),
            state.config.conflict_notice_ms,
        )
        .await?;
        sessions.insert(email.to_string(), workflow);
    }
    sessions
        .get_mut(email)
        .ok_or_else(|| AppError::Internal("session table entry vanished".to_string()))
}

pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.snapshot().await?;
    Ok(Json(snapshot))
}

pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.select_date(payload.date).await?;
    Ok(Json(snapshot))
}

pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(payload): Json<SelectSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.select_slot(payload.date, &payload.slot).await?;
    Ok(Json(snapshot))
}

pub async fn commit(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.commit().await?;
    Ok(Json(snapshot))
}

pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.cancel().await?;
    Ok(Json(snapshot))
}

pub async fn finish(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.finish().await?;
    Ok(Json(snapshot))
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut sessions = state.sessions.lock().await;
    let workflow = session_for(&state, &mut sessions, &email).await?;
    let snapshot = workflow.submit_feedback(payload.rating, payload.comment).await?;
    if workflow.is_finished() {
        // Cycle over; the next request starts a fresh Browsing instance.
        sessions.remove(&email);
        info!("Booking cycle finished for {}", email);
    }
    Ok(Json(snapshot))
}
