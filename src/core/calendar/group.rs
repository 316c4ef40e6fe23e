use crate::models::calendar_event::CalendarEvent;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Events of one calendar day, in display order.
pub type DayEvents = Vec<CalendarEvent>;

/// Partition events by calendar day.
///
/// Days are ordered by date. Inside a day, timed events come first ordered by
/// `start_time`; untimed events follow. Ties keep their insertion order.
pub fn group_by_date(events: Vec<CalendarEvent>) -> BTreeMap<NaiveDate, DayEvents> {
    let mut days: BTreeMap<NaiveDate, DayEvents> = BTreeMap::new();

    for ev in events {
        days.entry(ev.date).or_default().push(ev);
    }

    for list in days.values_mut() {
        // sort_by_key is stable
        list.sort_by_key(|ev| (ev.start_time.is_none(), ev.start_time));
    }

    days
}
