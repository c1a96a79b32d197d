use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::catalog::SlotCatalog;
use crate::domain::ports::ParticipantLedger;
use crate::error::AppError;

/// The occupant holding a contested (date, slot), surfaced so callers can
/// name them in the conflict message.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ConflictDetails {
    pub occupant_name: String,
    pub occupant_email: String,
    pub date: NaiveDate,
    pub slot: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailableReason {
    /// The catalog offers no such slot on that date (or no slots at all).
    NotOffered,
    /// Every catalog slot on that date is taken.
    FullyBooked,
}

/// Bookability of a candidate (date, slot). Conflicts and unavailability are
/// expected outcomes of normal use, so they are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotAssessment {
    Bookable,
    /// The requester already holds this slot; non-conflicting.
    HeldByRequester,
    Conflict(ConflictDetails),
    Unavailable(UnavailableReason),
}

/// Availability of a whole date, for calendar rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum DateAvailability {
    NotOffered,
    FullyBooked,
    Open { free_slots: Vec<String> },
}

/// Read-only guard over the ledger. Advisory at selection time; the
/// authoritative check is the ledger's atomic `attempt_booking` at commit.
pub async fn assess_slot(
    catalog: &SlotCatalog,
    ledger: &dyn ParticipantLedger,
    requester_email: &str,
    date: NaiveDate,
    slot: &str,
) -> Result<SlotAssessment, AppError> {
    if !catalog.offers_slot(date, slot) {
        return Ok(SlotAssessment::Unavailable(UnavailableReason::NotOffered));
    }

    match ledger.occupant_of(date, slot).await? {
        Some(occupant) if occupant.email == requester_email => Ok(SlotAssessment::HeldByRequester),
        Some(occupant) => {
            if date_is_fully_booked(catalog, ledger, date).await? {
                return Ok(SlotAssessment::Unavailable(UnavailableReason::FullyBooked));
            }
            Ok(SlotAssessment::Conflict(ConflictDetails {
                occupant_name: occupant.name,
                occupant_email: occupant.email,
                date,
                slot: slot.to_string(),
            }))
        }
        None => Ok(SlotAssessment::Bookable),
    }
}

pub async fn assess_date(
    catalog: &SlotCatalog,
    ledger: &dyn ParticipantLedger,
    date: NaiveDate,
) -> Result<DateAvailability, AppError> {
    let offered = catalog.slots_for(date);
    if offered.is_empty() {
        return Ok(DateAvailability::NotOffered);
    }
    let mut free = Vec::new();
    for slot in offered {
        if !ledger.is_slot_taken(date, slot).await? {
            free.push(slot.clone());
        }
    }
    if free.is_empty() {
        Ok(DateAvailability::FullyBooked)
    } else {
        Ok(DateAvailability::Open { free_slots: free })
    }
}

async fn date_is_fully_booked(
    catalog: &SlotCatalog,
    ledger: &dyn ParticipantLedger,
    date: NaiveDate,
) -> Result<bool, AppError> {
    for slot in catalog.slots_for(date) {
        if !ledger.is_slot_taken(date, slot).await? {
            return Ok(false);
        }
    }
    Ok(true)
}
