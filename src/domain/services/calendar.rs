use crate::domain::models::participant::Participant;
use chrono::{Days, NaiveDate};
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};
use uuid::Uuid;

/// Generates an iCalendar (.ics) string for a committed booking. Slots are
/// opaque labels with no time range, so the event is all-day with the slot in
/// the summary.
pub fn generate_ics(participant: &Participant, date: NaiveDate, slot: &str) -> String {
    let mut calendar = Calendar::new();

    let end = date.checked_add_days(Days::new(1)).unwrap_or(date);
    let ical_event = IcalEvent::new()
        .summary(&format!("SmartBooking: {} ({})", participant.name, slot))
        .description(&format!(
            "Booking for {} <{}> in slot {}",
            participant.name, participant.email, slot
        ))
        .starts(date)
        .ends(end)
        .uid(&Uuid::new_v4().to_string())
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
