use crate::domain::models::booking::{ArchiveReason, ArchivedBooking, BookingAttempt, DayBooking};
use crate::domain::models::participant::{BookingState, Feedback, Participant};
use crate::domain::ports::ParticipantLedger;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct LedgerInner {
    /// Keyed by email, the participant's unique identity.
    participants: BTreeMap<String, Participant>,
    /// Append-only record of bookings that left a participant.
    history: Vec<ArchivedBooking>,
}

/// In-process ledger. All writes go through one lock, so the occupancy check
/// and the booking write in `attempt_booking` form a single critical section.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn occupant_in<'a>(inner: &'a LedgerInner, date: NaiveDate, slot: &str) -> Option<&'a Participant> {
    inner
        .participants
        .values()
        .find(|p| p.booking.occupied_slot() == Some((date, slot)))
}

/// Moves the participant's current booking (if any) into the history list.
fn archive_current(inner: &mut LedgerInner, email: &str, reason: ArchiveReason) {
    let Some(participant) = inner.participants.get_mut(email) else {
        return;
    };
    let previous = std::mem::replace(&mut participant.booking, BookingState::Unbooked);
    let record = match previous {
        BookingState::Unbooked => return,
        BookingState::Active { date, slot } => {
            ArchivedBooking::new(email.to_string(), date, slot, reason, None)
        }
        BookingState::Completed { date, slot, feedback } => ArchivedBooking::new(
            email.to_string(),
            date,
            slot,
            ArchiveReason::Completed,
            Some(feedback),
        ),
    };
    inner.history.push(record);
}

#[async_trait]
impl ParticipantLedger for InMemoryLedger {
    async fn add_participant(&self, participant: &Participant) -> Result<Participant, AppError> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        if inner.participants.contains_key(&participant.email) {
            return Err(AppError::DuplicateEmail(participant.email.clone()));
        }
        inner
            .participants
            .insert(participant.email.clone(), participant.clone());
        Ok(participant.clone())
    }

    async fn remove_participant(&self, email: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        inner.participants.remove(email);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(inner.participants.get(email).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(inner.participants.values().cloned().collect())
    }

    async fn attempt_booking(
        &self,
        email: &str,
        date: NaiveDate,
        slot: &str,
    ) -> Result<BookingAttempt, AppError> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        if !inner.participants.contains_key(email) {
            return Err(AppError::UnknownParticipant(email.to_string()));
        }

        if let Some(occupant) = occupant_in(&inner, date, slot) {
            if occupant.email != email {
                return Ok(BookingAttempt::Taken { occupant: occupant.clone() });
            }
            if matches!(occupant.booking, BookingState::Active { .. }) {
                // Re-committing the slot the participant already holds.
                return Ok(BookingAttempt::Booked(occupant.clone()));
            }
        }

        archive_current(&mut inner, email, ArchiveReason::Rebooked);
        let participant = inner
            .participants
            .get_mut(email)
            .ok_or_else(|| AppError::UnknownParticipant(email.to_string()))?;
        participant.booking = BookingState::Active { date, slot: slot.to_string() };
        Ok(BookingAttempt::Booked(participant.clone()))
    }

    async fn clear_booking(&self, email: &str) -> Result<Option<ArchivedBooking>, AppError> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        if !inner.participants.contains_key(email) {
            return Err(AppError::UnknownParticipant(email.to_string()));
        }
        let before = inner.history.len();
        archive_current(&mut inner, email, ArchiveReason::Cancelled);
        Ok(inner.history.get(before).cloned())
    }

    async fn attach_feedback(
        &self,
        email: &str,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Participant, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::InvalidRating(rating));
        }
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        let participant = inner
            .participants
            .get_mut(email)
            .ok_or_else(|| AppError::UnknownParticipant(email.to_string()))?;

        let feedback = Feedback { rating, comment, submitted_at: Utc::now() };
        match std::mem::replace(&mut participant.booking, BookingState::Unbooked) {
            BookingState::Unbooked => {
                return Err(AppError::Validation(
                    "Cannot attach feedback without a booking".to_string(),
                ))
            }
            BookingState::Active { date, slot } | BookingState::Completed { date, slot, .. } => {
                participant.booking = BookingState::Completed { date, slot, feedback };
            }
        }
        Ok(participant.clone())
    }

    async fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<DayBooking>, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(inner
            .participants
            .values()
            .filter_map(|p| {
                p.booking.occupied_slot().and_then(|(d, slot)| {
                    (d == date).then(|| DayBooking { slot: slot.to_string(), participant: p.clone() })
                })
            })
            .collect())
    }

    async fn occupant_of(
        &self,
        date: NaiveDate,
        slot: &str,
    ) -> Result<Option<Participant>, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(occupant_in(&inner, date, slot).cloned())
    }

    async fn is_slot_taken(&self, date: NaiveDate, slot: &str) -> Result<bool, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(occupant_in(&inner, date, slot).is_some())
    }

    async fn booking_history(&self, email: &str) -> Result<Vec<ArchivedBooking>, AppError> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        Ok(inner
            .history
            .iter()
            .filter(|r| r.participant_email == email)
            .cloned()
            .collect())
    }
}
