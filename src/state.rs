use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::domain::models::catalog::SlotCatalog;
use crate::domain::ports::{ParticipantLedger, ReminderService};
use crate::domain::services::workflow::BookingWorkflow;

/// Shared application state: the injected ports plus one workflow per
/// participant session, keyed by email. User actions within a session run to
/// completion one at a time behind the session lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<SlotCatalog>,
    pub ledger: Arc<dyn ParticipantLedger>,
    pub reminder_service: Arc<dyn ReminderService>,
    pub sessions: Arc<Mutex<HashMap<String, BookingWorkflow>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<SlotCatalog>,
        ledger: Arc<dyn ParticipantLedger>,
        reminder_service: Arc<dyn ReminderService>,
    ) -> Self {
        Self {
            config,
            catalog,
            ledger,
            reminder_service,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
