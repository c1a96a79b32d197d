use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::participant::{BookingState, Participant};
use crate::domain::services::workflow::SlotOccupancy;

/// One row of the admin overview table: every registered participant with
/// their booking columns.
#[derive(Serialize)]
pub struct ParticipantOverviewRow {
    pub name: String,
    pub email: String,
    pub profession: String,
    pub slots: String,
    pub booking_date: Option<NaiveDate>,
    pub booking_slot: Option<String>,
    pub status: &'static str,
    pub rating: Option<i32>,
}

impl From<&Participant> for ParticipantOverviewRow {
    fn from(p: &Participant) -> Self {
        let (booking_date, booking_slot) = match p.booking.occupied_slot() {
            Some((date, slot)) => (Some(date), Some(slot.to_string())),
            None => (None, None),
        };
        let status = match p.booking {
            BookingState::Unbooked => "UNBOOKED",
            BookingState::Active { .. } => "ACTIVE",
            BookingState::Completed { .. } => "COMPLETED",
        };
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
            profession: p.profession.clone(),
            slots: p.slot_label.clone(),
            booking_date,
            booking_slot,
            status,
            rating: p.booking.feedback().map(|f| f.rating),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    NotOffered,
    FullyBooked,
    Open,
}

/// A date's catalog slots with their occupancy, for calendar rendering.
#[derive(Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub slots: Vec<SlotOccupancy>,
}
