use crate::domain::models::{
    booking::{ArchivedBooking, BookingAttempt, DayBooking},
    participant::Participant,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// The authoritative record of participants and their active bookings. The
/// core does not care whether this backs onto memory or a database, as long
/// as `attempt_booking` keeps the at-most-one-occupant invariant under one
/// critical section.
#[async_trait]
pub trait ParticipantLedger: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is already registered.
    async fn add_participant(&self, participant: &Participant) -> Result<Participant, AppError>;

    /// Idempotent: removing an unknown email is a no-op.
    async fn remove_participant(&self, email: &str) -> Result<(), AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, AppError>;

    async fn list(&self) -> Result<Vec<Participant>, AppError>;

    /// Atomically checks occupancy of (date, slot) and attaches the booking
    /// when free, or reports the current occupant. A prior booking held by
    /// the participant is archived, never silently dropped.
    async fn attempt_booking(
        &self,
        email: &str,
        date: NaiveDate,
        slot: &str,
    ) -> Result<BookingAttempt, AppError>;

    /// Idempotent: clearing a participant with no booking is a no-op. A
    /// cleared booking is archived with reason `Cancelled`.
    async fn clear_booking(&self, email: &str) -> Result<Option<ArchivedBooking>, AppError>;

    /// Fails with `InvalidRating` outside [1,5]. Overwrites prior feedback
    /// (last-write-wins).
    async fn attach_feedback(
        &self,
        email: &str,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Participant, AppError>;

    async fn bookings_for_date(&self, date: NaiveDate) -> Result<Vec<DayBooking>, AppError>;

    async fn occupant_of(&self, date: NaiveDate, slot: &str)
        -> Result<Option<Participant>, AppError>;

    async fn is_slot_taken(&self, date: NaiveDate, slot: &str) -> Result<bool, AppError>;

    async fn booking_history(&self, email: &str) -> Result<Vec<ArchivedBooking>, AppError>;
}

/// Outbound seam for due-soon reminders. Real delivery lives behind this
/// trait; the shipped implementation logs.
#[async_trait]
pub trait ReminderService: Send + Sync {
    async fn send_due_soon(
        &self,
        participant: &Participant,
        date: NaiveDate,
        slot: &str,
    ) -> Result<(), AppError>;
}
