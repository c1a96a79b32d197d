use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::RegisterParticipantRequest;
use crate::api::dtos::responses::ParticipantOverviewRow;
use crate::domain::models::participant::{NewParticipantParams, Participant};
use crate::domain::services::calendar::generate_ics;
use crate::domain::services::temporal::{due_soon_notice, local_today};
use crate::error::AppError;
use crate::state::AppState;

pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".to_string()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }

    let participant = Participant::new(NewParticipantParams {
        email: payload.email,
        name: payload.name,
        phone: payload.phone,
        profession: payload.profession,
        description: payload.description,
        slot_label: payload.slots,
    });
    let created = state.ledger.add_participant(&participant).await?;
    info!("Registered participant {}", created.email);
    Ok(Json(created))
}

/// Admin overview: all registered participants and their bookings.
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let participants = state.ledger.list().await?;
    let rows: Vec<ParticipantOverviewRow> =
        participants.iter().map(ParticipantOverviewRow::from).collect();
    Ok(Json(rows))
}

pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state
        .ledger
        .find_by_email(&email)
        .await?
        .ok_or(AppError::UnknownParticipant(email))?;
    Ok(Json(participant))
}

/// Idempotent: deleting an unregistered email succeeds. Drops any open
/// session alongside the ledger entry.
pub async fn remove_participant(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.ledger.remove_participant(&email).await?;
    state.sessions.lock().await.remove(&email);
    info!("Removed participant {}", email);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn booking_history(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .ledger
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::UnknownParticipant(email.clone()))?;
    let history = state.ledger.booking_history(&email).await?;
    Ok(Json(history))
}

/// Due-soon probe for the reminder collaborator.
pub async fn reminder(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state
        .ledger
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::UnknownParticipant(email.clone()))?;
    let (date, slot) = participant
        .booking
        .occupied_slot()
        .ok_or_else(|| AppError::NotFound(format!("No booking on record for {}", email)))?;
    Ok(Json(due_soon_notice(date, slot, local_today())))
}

pub async fn export_ics(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let participant = state
        .ledger
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::UnknownParticipant(email.clone()))?;
    let (date, slot) = participant
        .booking
        .occupied_slot()
        .ok_or_else(|| AppError::NotFound(format!("No booking to export for {}", email)))?;
    let ics = generate_ics(&participant, date, slot);
    Ok(([(header::CONTENT_TYPE, "text/calendar; charset=utf-8")], ics))
}
