use crate::errors::{AppError, AppResult};
use crate::models::calendar_event::{CalendarEvent, EventKind};
use crate::models::category::TaskCategory;
use crate::models::status::TaskStatus;

/// User selection applied to materialized events.
///
/// Leave events always pass the category, project and service filters:
/// absences are shown next to whatever slice of work is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarFilter {
    /// Event kinds to keep; empty keeps every kind.
    pub kinds: Vec<EventKind>,
    pub project_id: Option<i32>,
    pub service: Option<String>,
    pub category: Option<TaskCategory>,
    pub include_done: bool,
}

impl CalendarFilter {
    pub fn all() -> Self {
        Self {
            include_done: true,
            ..Self::default()
        }
    }

    /// Parse a comma separated list of kinds, e.g. `task,leave`.
    pub fn parse_kinds(list: &str) -> AppResult<Vec<EventKind>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| EventKind::from_code(s).ok_or_else(|| AppError::invalid_code("type", s)))
            .collect()
    }

    pub fn matches(&self, ev: &CalendarEvent) -> bool {
        if !self.kinds.is_empty() && !self.kinds.contains(&ev.kind) {
            return false;
        }

        if !ev.kind.is_work() {
            return true;
        }

        if let Some(category) = self.category {
            let keep = match category {
                TaskCategory::SimpleTask => ev.kind == EventKind::SimpleTask,
                TaskCategory::Task => matches!(ev.kind, EventKind::Task | EventKind::Project),
            };
            if !keep {
                return false;
            }
        }

        if let Some(pid) = self.project_id
            && ev.project_id != Some(pid)
        {
            return false;
        }

        if let Some(service) = &self.service
            && !ev
                .service
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(service))
        {
            return false;
        }

        if !self.include_done
            && matches!(ev.kind, EventKind::Task | EventKind::SimpleTask)
            && ev.status.as_deref() == Some(TaskStatus::Done.to_db_str())
        {
            return false;
        }

        true
    }

    pub fn apply(&self, events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
        events.into_iter().filter(|ev| self.matches(ev)).collect()
    }
}
