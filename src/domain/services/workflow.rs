use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::catalog::SlotCatalog;
use crate::domain::models::participant::BookingState;
use crate::domain::models::booking::BookingAttempt;
use crate::domain::ports::ParticipantLedger;
use crate::domain::services::conflict::{assess_slot, ConflictDetails, SlotAssessment, UnavailableReason};
use crate::domain::services::temporal::{due_soon_notice, local_today, DueSoonNotice};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    Browsing,
    SlotSelected { date: NaiveDate, slot: String },
    Committed { date: NaiveDate, slot: String },
    FeedbackPending { date: NaiveDate, slot: String },
    FeedbackSubmitted,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    SlotConflict,
    NotOffered,
    FullyBooked,
}

/// Conflict/unavailability notification. The client hides it after
/// `expires_in_ms`; the core only emits the event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConflictNotice {
    pub kind: NoticeKind,
    pub message: String,
    pub date: NaiveDate,
    pub slot: String,
    pub occupant: Option<ConflictDetails>,
    pub expires_in_ms: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlotOccupancy {
    pub slot: String,
    pub occupant: Option<String>,
    pub held_by_requester: bool,
}

/// Read-only view handed to rendering collaborators after every transition.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowSnapshot {
    pub participant: String,
    pub current_state: WorkflowState,
    pub selected_date: Option<NaiveDate>,
    pub selected_slot: Option<String>,
    pub occupancy: Vec<SlotOccupancy>,
    pub conflict: Option<ConflictNotice>,
    pub reminder: Option<DueSoonNotice>,
}

/// Per-session booking state machine:
/// Browsing → SlotSelected → Committed → (FeedbackPending → FeedbackSubmitted),
/// with cancel returning Committed → Browsing. Ledger failures abort the
/// transition and leave the machine where it was.
pub struct BookingWorkflow {
    email: String,
    catalog: Arc<SlotCatalog>,
    ledger: Arc<dyn ParticipantLedger>,
    state: WorkflowState,
    active_date: Option<NaiveDate>,
    notice: Option<ConflictNotice>,
    notice_ttl_ms: u64,
}

impl BookingWorkflow {
    /// Starts a session for a registered participant. A booking already held
    /// in the ledger resumes the machine in `Committed`, so cancel/finish
    /// keep working across sessions.
    pub async fn start(
        email: &str,
        default_date: Option<NaiveDate>,
        catalog: Arc<SlotCatalog>,
        ledger: Arc<dyn ParticipantLedger>,
        notice_ttl_ms: u64,
    ) -> Result<Self, AppError> {
        let participant = ledger
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::UnknownParticipant(email.to_string()))?;

        let (state, active_date) = match &participant.booking {
            BookingState::Active { date, slot } => (
                WorkflowState::Committed { date: *date, slot: slot.clone() },
                Some(*date),
            ),
            _ => (WorkflowState::Browsing, default_date),
        };

        Ok(Self {
            email: email.to_string(),
            catalog,
            ledger,
            state,
            active_date,
            notice: None,
            notice_ttl_ms,
        })
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, WorkflowState::FeedbackSubmitted)
    }

    /// Re-enters Browsing with a new active date; any slot selection is
    /// dropped.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<WorkflowSnapshot, AppError> {
        match self.state {
            WorkflowState::Browsing | WorkflowState::SlotSelected { .. } => {
                self.state = WorkflowState::Browsing;
                self.active_date = Some(date);
                self.notice = None;
                self.snapshot().await
            }
            WorkflowState::Committed { .. } | WorkflowState::FeedbackPending { .. } => {
                Err(AppError::Conflict(
                    "A booking is already committed; cancel it before browsing other dates".to_string(),
                ))
            }
            WorkflowState::FeedbackSubmitted => {
                Err(AppError::Conflict("This booking cycle is finished".to_string()))
            }
        }
    }

    /// Selects a slot when the conflict detector allows it; otherwise stays
    /// put and records an auto-expiring notice.
    pub async fn select_slot(
        &mut self,
        date: NaiveDate,
        slot: &str,
    ) -> Result<WorkflowSnapshot, AppError> {
        match self.state {
            WorkflowState::Browsing | WorkflowState::SlotSelected { .. } => {}
            _ => {
                return Err(AppError::Conflict(
                    "A booking is already committed; cancel it before selecting a new slot".to_string(),
                ))
            }
        }

        self.active_date = Some(date);
        let assessment =
            assess_slot(&self.catalog, self.ledger.as_ref(), &self.email, date, slot).await?;
        match assessment {
            SlotAssessment::Bookable | SlotAssessment::HeldByRequester => {
                self.state = WorkflowState::SlotSelected { date, slot: slot.to_string() };
                self.notice = None;
            }
            SlotAssessment::Conflict(details) => {
                self.notice = Some(self.conflict_notice(details));
            }
            SlotAssessment::Unavailable(reason) => {
                self.notice = Some(self.unavailable_notice(date, slot, reason));
            }
        }
        self.snapshot().await
    }

    /// Commits the selected slot through the ledger's atomic check-then-write.
    /// A slot lost since selection lands back in Browsing with a notice and no
    /// partial write. Re-committing from Committed is a no-op.
    pub async fn commit(&mut self) -> Result<WorkflowSnapshot, AppError> {
        let (date, slot) = match &self.state {
            WorkflowState::Committed { .. } => return self.snapshot().await,
            WorkflowState::SlotSelected { date, slot } => (*date, slot.clone()),
            _ => return Err(AppError::Conflict("No slot selected to commit".to_string())),
        };

        match self.ledger.attempt_booking(&self.email, date, &slot).await? {
            BookingAttempt::Booked(_) => {
                info!("Committed booking for {}: {} {}", self.email, date, slot);
                self.state = WorkflowState::Committed { date, slot };
                self.notice = None;
            }
            BookingAttempt::Taken { occupant } => {
                self.state = WorkflowState::Browsing;
                self.notice = Some(self.conflict_notice(ConflictDetails {
                    occupant_name: occupant.name,
                    occupant_email: occupant.email,
                    date,
                    slot,
                }));
            }
        }
        self.snapshot().await
    }

    /// Clears the committed booking and returns to Browsing. The ledger
    /// archives the booking, so history survives.
    pub async fn cancel(&mut self) -> Result<WorkflowSnapshot, AppError> {
        match &self.state {
            WorkflowState::Committed { .. } => {
                self.ledger.clear_booking(&self.email).await?;
                info!("Cancelled booking for {}", self.email);
                self.state = WorkflowState::Browsing;
                self.notice = None;
                self.snapshot().await
            }
            _ => Err(AppError::Conflict("No committed booking to cancel".to_string())),
        }
    }

    pub async fn finish(&mut self) -> Result<WorkflowSnapshot, AppError> {
        match &self.state {
            WorkflowState::Committed { date, slot } => {
                self.state = WorkflowState::FeedbackPending { date: *date, slot: slot.clone() };
                self.snapshot().await
            }
            _ => Err(AppError::Conflict("No committed booking to finish".to_string())),
        }
    }

    /// Submitting with no rating is rejected and the state stays
    /// FeedbackPending; so does an out-of-range rating.
    pub async fn submit_feedback(
        &mut self,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<WorkflowSnapshot, AppError> {
        match &self.state {
            WorkflowState::FeedbackPending { .. } => {
                let rating = rating
                    .ok_or_else(|| AppError::Validation("A rating is required".to_string()))?;
                self.ledger.attach_feedback(&self.email, rating, comment).await?;
                self.state = WorkflowState::FeedbackSubmitted;
                self.snapshot().await
            }
            _ => Err(AppError::Conflict("No feedback is pending".to_string())),
        }
    }

    pub async fn snapshot(&self) -> Result<WorkflowSnapshot, AppError> {
        let selected = match &self.state {
            WorkflowState::SlotSelected { date, slot }
            | WorkflowState::Committed { date, slot }
            | WorkflowState::FeedbackPending { date, slot } => Some((*date, slot.clone())),
            _ => None,
        };
        let selected_date = selected.as_ref().map(|(d, _)| *d).or(self.active_date);

        let occupancy = match selected_date {
            Some(date) => self.occupancy_for(date).await?,
            None => Vec::new(),
        };

        let reminder = self
            .ledger
            .find_by_email(&self.email)
            .await?
            .and_then(|p| {
                p.booking
                    .occupied_slot()
                    .map(|(date, slot)| due_soon_notice(date, slot, local_today()))
            });

        Ok(WorkflowSnapshot {
            participant: self.email.clone(),
            current_state: self.state.clone(),
            selected_date,
            selected_slot: selected.map(|(_, s)| s),
            occupancy,
            conflict: self.notice.clone(),
            reminder,
        })
    }

    async fn occupancy_for(&self, date: NaiveDate) -> Result<Vec<SlotOccupancy>, AppError> {
        let mut rows = Vec::new();
        for slot in self.catalog.slots_for(date) {
            let occupant = self.ledger.occupant_of(date, slot).await?;
            rows.push(SlotOccupancy {
                slot: slot.clone(),
                held_by_requester: occupant.as_ref().is_some_and(|p| p.email == self.email),
                occupant: occupant.map(|p| p.name),
            });
        }
        Ok(rows)
    }

    fn conflict_notice(&self, details: ConflictDetails) -> ConflictNotice {
        ConflictNotice {
            kind: NoticeKind::SlotConflict,
            message: format!(
                "{} on {} is already booked by {}",
                details.slot, details.date, details.occupant_name
            ),
            date: details.date,
            slot: details.slot.clone(),
            occupant: Some(details),
            expires_in_ms: self.notice_ttl_ms,
        }
    }

    fn unavailable_notice(
        &self,
        date: NaiveDate,
        slot: &str,
        reason: UnavailableReason,
    ) -> ConflictNotice {
        let (kind, message) = match reason {
            UnavailableReason::NotOffered => (
                NoticeKind::NotOffered,
                format!("{} is not offered on {}", slot, date),
            ),
            UnavailableReason::FullyBooked => (
                NoticeKind::FullyBooked,
                format!("All slots on {} are taken", date),
            ),
        };
        ConflictNotice {
            kind,
            message,
            date,
            slot: slot.to_string(),
            occupant: None,
            expires_in_ms: self.notice_ttl_ms,
        }
    }
}
