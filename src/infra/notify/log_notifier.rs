use crate::domain::models::participant::Participant;
use crate::domain::ports::ReminderService;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::info;

/// Reminder sink that logs instead of delivering. De-dupes per
/// (participant, date) so the sweep loop fires each reminder once.
#[derive(Default)]
pub struct LogReminderService {
    sent: Mutex<HashSet<(String, NaiveDate)>>,
}

impl LogReminderService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderService for LogReminderService {
    async fn send_due_soon(
        &self,
        participant: &Participant,
        date: NaiveDate,
        slot: &str,
    ) -> Result<(), AppError> {
        let key = (participant.email.clone(), date);
        let mut sent = self.sent.lock().expect("reminder lock poisoned");
        if !sent.insert(key) {
            return Ok(());
        }
        info!(
            participant = %participant.email,
            date = %date,
            slot = %slot,
            "Booking due soon"
        );
        Ok(())
    }
}
