use crate::models::{Booking, Event};
use std::collections::{HashMap, HashSet};

/// Map a student's bookings to the titles of the events they attended.
///
/// Keeps booking order (most recent first). Bookings whose event is no longer
/// in the catalog are skipped, as are repeat bookings of the same event.
pub fn past_activity(bookings: &[Booking], catalog: &[Event]) -> Vec<String> {
    let titles: HashMap<&str, &str> = catalog
        .iter()
        .map(|event| (event.id.as_str(), event.title.as_str()))
        .collect();

    let mut seen = HashSet::new();

    bookings
        .iter()
        .filter_map(|booking| titles.get(booking.event_id.as_str()).copied())
        .filter(|title| seen.insert(*title))
        .map(str::to_string)
        .collect()
}
