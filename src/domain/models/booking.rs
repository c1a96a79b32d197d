use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::participant::{Feedback, Participant};

/// Why a booking left a participant's record. Cancelled and superseded
/// bookings are archived rather than dropped, so cancellation keeps history.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchiveReason {
    Cancelled,
    Completed,
    Rebooked,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArchivedBooking {
    pub id: String,
    pub participant_email: String,
    pub date: NaiveDate,
    pub slot: String,
    pub reason: ArchiveReason,
    pub feedback: Option<Feedback>,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedBooking {
    pub fn new(
        participant_email: String,
        date: NaiveDate,
        slot: String,
        reason: ArchiveReason,
        feedback: Option<Feedback>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            participant_email,
            date,
            slot,
            reason,
            feedback,
            archived_at: Utc::now(),
        }
    }
}

/// Outcome of the ledger's atomic check-then-write booking operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAttempt {
    Booked(Participant),
    Taken { occupant: Participant },
}

/// One row of a day's occupancy: who holds which slot.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayBooking {
    pub slot: String,
    pub participant: Participant,
}
