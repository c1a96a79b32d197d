use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Feedback {
    pub rating: i32,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Booking status as a tagged variant. A participant holds at most one
/// booking; `Active` and `Completed` both occupy their (date, slot) on the
/// calendar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    Unbooked,
    Active { date: NaiveDate, slot: String },
    Completed { date: NaiveDate, slot: String, feedback: Feedback },
}

impl BookingState {
    /// The (date, slot) this participant occupies on the calendar, if any.
    pub fn occupied_slot(&self) -> Option<(NaiveDate, &str)> {
        match self {
            BookingState::Unbooked => None,
            BookingState::Active { date, slot } | BookingState::Completed { date, slot, .. } => {
                Some((*date, slot.as_str()))
            }
        }
    }

    pub fn is_unbooked(&self) -> bool {
        matches!(self, BookingState::Unbooked)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            BookingState::Completed { feedback, .. } => Some(feedback),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Participant {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub profession: String,
    pub description: String,
    /// Display-only capacity descriptor (e.g. "Mon-Fri 9am-5pm"), not a
    /// scheduling constraint.
    pub slot_label: String,
    pub booking: BookingState,
    pub created_at: DateTime<Utc>,
}

pub struct NewParticipantParams {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub profession: String,
    pub description: String,
    pub slot_label: String,
}

impl Participant {
    pub fn new(params: NewParticipantParams) -> Self {
        Self {
            email: params.email,
            name: params.name,
            phone: params.phone,
            profession: params.profession,
            description: params.description,
            slot_label: params.slot_label,
            booking: BookingState::Unbooked,
            created_at: Utc::now(),
        }
    }
}
