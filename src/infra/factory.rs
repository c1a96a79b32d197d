use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::domain::models::catalog::SlotCatalog;
use crate::domain::services::temporal::local_today;
use crate::infra::ledgers::memory_ledger::InMemoryLedger;
use crate::infra::notify::log_notifier::LogReminderService;
use crate::state::AppState;

const DEFAULT_CATALOG_DAYS: u32 = 30;

pub fn bootstrap_state(config: &Config) -> AppState {
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading slot catalog from {}", path);
            SlotCatalog::from_json_file(path).expect("Failed to load slot catalog")
        }
        None => {
            info!(
                "No CATALOG_PATH set, generating weekday defaults for the next {} days",
                DEFAULT_CATALOG_DAYS
            );
            SlotCatalog::weekday_defaults(local_today(), DEFAULT_CATALOG_DAYS)
        }
    };

    AppState::new(
        config.clone(),
        Arc::new(catalog),
        Arc::new(InMemoryLedger::new()),
        Arc::new(LogReminderService::new()),
    )
}
