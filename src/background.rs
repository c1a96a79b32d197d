use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

use crate::domain::services::temporal::{is_due_soon, local_today};
use crate::state::AppState;

/// Periodically sweeps the ledger and pushes due-soon reminders to the
/// reminder port. Reminders are derived from bookings on every pass, so the
/// sweep needs no job queue; the sink de-dupes.
pub async fn start_reminder_worker(state: Arc<AppState>) {
    info!("Starting reminder sweep worker...");

    loop {
        let today = local_today();
        match state.ledger.list().await {
            Ok(participants) => {
                for participant in participants {
                    let Some((date, slot)) = participant.booking.occupied_slot() else {
                        continue;
                    };
                    if !is_due_soon(date, today) {
                        continue;
                    }
                    if let Err(e) = state
                        .reminder_service
                        .send_due_soon(&participant, date, slot)
                        .await
                    {
                        error!("Failed to send reminder for {}: {:?}", participant.email, e);
                    }
                }
            }
            Err(e) => error!("Failed to list participants for reminder sweep: {:?}", e),
        }
        sleep(Duration::from_secs(state.config.reminder_poll_secs)).await;
    }
}
