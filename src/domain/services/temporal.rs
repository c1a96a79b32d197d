use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

/// Classification works on calendar days only. Callers pass "today"
/// explicitly; nothing here reads the clock except `local_today`.
pub fn is_past_date(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_upcoming_or_today(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Due soon: today or tomorrow, the reminder trigger window.
pub fn is_due_soon(date: NaiveDate, today: NaiveDate) -> bool {
    date == today || today.checked_add_days(Days::new(1)) == Some(date)
}

/// "Today" as a local calendar date, time-of-day discarded.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Outbound reminder payload: the due-soon flag plus the triggering booking.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DueSoonNotice {
    pub due_soon: bool,
    pub date: NaiveDate,
    pub slot: String,
}

pub fn due_soon_notice(date: NaiveDate, slot: &str, today: NaiveDate) -> DueSoonNotice {
    DueSoonNotice {
        due_soon: is_due_soon(date, today),
        date,
        slot: slot.to_string(),
    }
}
