use super::expander::expand_all_in;
use super::filter::CalendarFilter;
use super::group::{DayEvents, group_by_date};
use crate::errors::AppResult;
use crate::models::calendar_event::CalendarEvent;
use crate::models::leave::Leave;
use crate::models::project::Project;
use crate::models::task::Task;
use crate::ui::messages::warning;
use crate::utils::date::DateWindow;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Where the calendar reads its entities from.
///
/// Implementations may return entities that do not touch the window;
/// materialization drops the days outside of it.
pub trait CalendarSource {
    fn tasks_in(&mut self, window: &DateWindow) -> AppResult<Vec<Task>>;
    fn leaves_in(&mut self, window: &DateWindow) -> AppResult<Vec<Leave>>;
    fn projects_in(&mut self, window: &DateWindow) -> AppResult<Vec<Project>>;
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    pub window: DateWindow,
    pub days: BTreeMap<NaiveDate, DayEvents>,
}

impl CalendarView {
    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Flatten back to a list ordered by day, then by display order.
    pub fn into_events(self) -> Vec<CalendarEvent> {
        self.days.into_values().flatten().collect()
    }
}

pub struct CalendarLogic;

impl CalendarLogic {
    /// Fetch, expand, clip to the window, filter and group.
    ///
    /// A failing fetch is reported and treated as an empty list, so one broken
    /// entity kind never hides the others.
    pub fn materialize<S: CalendarSource>(
        source: &mut S,
        window: &DateWindow,
        filter: &CalendarFilter,
    ) -> CalendarView {
        let tasks = or_empty("tasks", source.tasks_in(window));
        let leaves = or_empty("leaves", source.leaves_in(window));
        let projects = or_empty("projects", source.projects_in(window));

        let events = expand_all_in(&tasks, &leaves, &projects, window)
            .into_iter()
            .filter(|ev| filter.matches(ev))
            .collect();

        CalendarView {
            window: *window,
            days: group_by_date(events),
        }
    }
}

fn or_empty<T>(label: &str, res: AppResult<Vec<T>>) -> Vec<T> {
    match res {
        Ok(items) => items,
        Err(e) => {
            warning(format!("Failed to load {label}, showing none: {e}"));
            Vec::new()
        }
    }
}
