use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::dtos::responses::{DaySchedule, DayStatus};
use crate::domain::services::conflict::{assess_date, DateAvailability};
use crate::domain::services::workflow::SlotOccupancy;
use crate::error::AppError;
use crate::state::AppState;

/// Catalog slots and occupancy for one date. Distinguishes a date the
/// catalog never offered from one that is fully booked.
pub async fn get_day_schedule(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, AppError> {
    let status = match assess_date(&state.catalog, state.ledger.as_ref(), date).await? {
        DateAvailability::NotOffered => DayStatus::NotOffered,
        DateAvailability::FullyBooked => DayStatus::FullyBooked,
        DateAvailability::Open { .. } => DayStatus::Open,
    };

    let mut slots = Vec::new();
    for slot in state.catalog.slots_for(date) {
        let occupant = state.ledger.occupant_of(date, slot).await?;
        slots.push(SlotOccupancy {
            slot: slot.clone(),
            held_by_requester: false,
            occupant: occupant.map(|p| p.name),
        });
    }

    Ok(Json(DaySchedule { date, status, slots }))
}
