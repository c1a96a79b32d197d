use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::AppError;

/// Immutable mapping from calendar date to the ordered slot labels offered
/// that day. Configuration data, never derived from bookings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SlotCatalog {
    days: BTreeMap<NaiveDate, Vec<String>>,
}

impl SlotCatalog {
    pub fn new(days: BTreeMap<NaiveDate, Vec<String>>) -> Self {
        Self { days }
    }

    /// Loads a catalog from a JSON object of "YYYY-MM-DD" keys to slot-label
    /// arrays.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Internal(format!("Failed to read catalog file: {}", e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Failed to parse catalog file: {}", e)))
    }

    /// Default catalog: weekday business-hour slots for the next `days` days.
    pub fn weekday_defaults(from: NaiveDate, days: u32) -> Self {
        let slots = ["9:00 AM", "10:00 AM", "11:00 AM", "2:00 PM", "4:00 PM"];
        let mut map = BTreeMap::new();
        for offset in 0..days {
            if let Some(date) = from.checked_add_days(chrono::Days::new(offset as u64)) {
                match date.weekday() {
                    Weekday::Sat | Weekday::Sun => continue,
                    _ => {
                        map.insert(date, slots.iter().map(|s| s.to_string()).collect());
                    }
                }
            }
        }
        Self { days: map }
    }

    /// Total lookup: dates not in the catalog offer no slots.
    pub fn slots_for(&self, date: NaiveDate) -> &[String] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn offers(&self, date: NaiveDate) -> bool {
        !self.slots_for(date).is_empty()
    }

    pub fn offers_slot(&self, date: NaiveDate, slot: &str) -> bool {
        self.slots_for(date).iter().any(|s| s == slot)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }
}
