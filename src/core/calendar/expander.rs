//! Event expansion: one calendar event per day of an entity's date range.

use crate::models::calendar_event::{CalendarEvent, EventKind, HalfDayType};
use crate::models::category::TaskCategory;
use crate::models::leave::Leave;
use crate::models::project::Project;
use crate::models::status::LeaveStatus;
use crate::models::task::Task;
use crate::utils::date::DateWindow;
use chrono::NaiveDate;

/// Inclusive range of days covered by one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DaySpan {
    /// An end date before the start date is not a valid range: the span
    /// collapses to the single day `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    pub fn total_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    /// `(span_day, date)` pairs, `span_day` starting at 1.
    pub fn days(&self) -> impl Iterator<Item = (u32, NaiveDate)> + use<> {
        (1..=self.total_days()).zip(self.start.iter_days())
    }

    /// Like [`DaySpan::days`], restricted to the days inside `window`.
    /// `span_day` still counts from the start of the whole span.
    pub fn days_within(&self, window: &DateWindow) -> impl Iterator<Item = (u32, NaiveDate)> + use<> {
        let first = self.start.max(window.start);
        let last = self.end.min(window.end);
        let (skipped, count) = if first <= last {
            (
                (first - self.start).num_days() as u32,
                (last - first).num_days() as u32 + 1,
            )
        } else {
            (0, 0)
        };
        (skipped + 1..=skipped + count).zip(first.iter_days())
    }
}

/// Span of a task: start date (creation date as fallback) to due date.
/// Returns `None` for backlog tasks that carry neither a start nor a due date.
pub fn task_span(task: &Task) -> Option<DaySpan> {
    if !task.is_scheduled() {
        return None;
    }
    let start = task
        .start_date
        .or_else(|| task.created_date())
        .or(task.due_date)?;
    let end = task.due_date.unwrap_or(start);
    Some(DaySpan::new(start, end))
}

pub fn project_span(project: &Project) -> Option<DaySpan> {
    let start = project
        .start_date
        .or_else(|| project.created_date())
        .or(project.end_date)?;
    let end = project.end_date.unwrap_or(start);
    Some(DaySpan::new(start, end))
}

pub fn leave_span(leave: &Leave) -> DaySpan {
    DaySpan::new(leave.start_date, leave.end_date)
}

/// Half-day classification of day `span_day` (1-based) out of `total`.
pub fn half_day_type(leave: &Leave, span_day: u32, total: u32) -> HalfDayType {
    if total == 1 {
        return if leave.half_day_start {
            HalfDayType::Afternoon
        } else if leave.half_day_end {
            HalfDayType::Morning
        } else {
            HalfDayType::Full
        };
    }

    if span_day == 1 && leave.half_day_start {
        HalfDayType::Afternoon
    } else if span_day == total && leave.half_day_end {
        HalfDayType::Morning
    } else {
        HalfDayType::Full
    }
}

fn base_event(
    kind: EventKind,
    entity_id: i32,
    title: &str,
    date: NaiveDate,
    span_day: u32,
    total: u32,
) -> CalendarEvent {
    CalendarEvent {
        id: CalendarEvent::event_id(kind, entity_id, date),
        title: title.to_string(),
        date,
        kind,
        status: None,
        priority: None,
        original_entity_id: entity_id,
        project_id: None,
        service: None,
        category: None,
        span_day: Some(span_day),
        total_span_days: Some(total),
        start_time: None,
        end_time: None,
        half_day_type: None,
    }
}

fn task_events(
    task: &Task,
    total: u32,
    days: impl Iterator<Item = (u32, NaiveDate)>,
) -> Vec<CalendarEvent> {
    let kind = match task.category {
        TaskCategory::SimpleTask => EventKind::SimpleTask,
        TaskCategory::Task => EventKind::Task,
    };

    days.map(|(n, date)| CalendarEvent {
        status: Some(task.status.to_db_str().to_string()),
        priority: Some(task.priority),
        project_id: task.project_id,
        service: task.service.clone(),
        category: Some(task.category),
        start_time: task.start_time,
        end_time: task.end_time,
        ..base_event(kind, task.id, &task.title, date, n, total)
    })
    .collect()
}

fn project_events(
    project: &Project,
    total: u32,
    days: impl Iterator<Item = (u32, NaiveDate)>,
) -> Vec<CalendarEvent> {
    days.map(|(n, date)| CalendarEvent {
        status: Some(project.status.to_db_str().to_string()),
        project_id: Some(project.id),
        service: project.service.clone(),
        ..base_event(EventKind::Project, project.id, &project.name, date, n, total)
    })
    .collect()
}

fn leave_events(
    leave: &Leave,
    total: u32,
    days: impl Iterator<Item = (u32, NaiveDate)>,
) -> Vec<CalendarEvent> {
    if leave.status == LeaveStatus::Rejected {
        return Vec::new();
    }
    let title = leave.title();

    days.map(|(n, date)| CalendarEvent {
        status: Some(leave.status.to_db_str().to_string()),
        half_day_type: Some(half_day_type(leave, n, total)),
        ..base_event(EventKind::Leave, leave.id, &title, date, n, total)
    })
    .collect()
}

pub fn expand_task(task: &Task) -> Vec<CalendarEvent> {
    match task_span(task) {
        Some(span) => task_events(task, span.total_days(), span.days()),
        None => Vec::new(),
    }
}

pub fn expand_project(project: &Project) -> Vec<CalendarEvent> {
    match project_span(project) {
        Some(span) => project_events(project, span.total_days(), span.days()),
        None => Vec::new(),
    }
}

/// Rejected leaves are not shown on the calendar.
pub fn expand_leave(leave: &Leave) -> Vec<CalendarEvent> {
    let span = leave_span(leave);
    leave_events(leave, span.total_days(), span.days())
}

/// Expand every entity, in the order tasks, leaves, projects.
pub fn expand_all(tasks: &[Task], leaves: &[Leave], projects: &[Project]) -> Vec<CalendarEvent> {
    let mut out = Vec::new();
    out.extend(tasks.iter().flat_map(expand_task));
    out.extend(leaves.iter().flat_map(expand_leave));
    out.extend(projects.iter().flat_map(expand_project));
    out
}

/// Same as [`expand_all`], but only the days inside `window` are generated.
/// The cost follows the window size, not the length of each span.
pub fn expand_all_in(
    tasks: &[Task],
    leaves: &[Leave],
    projects: &[Project],
    window: &DateWindow,
) -> Vec<CalendarEvent> {
    let mut out = Vec::new();
    for t in tasks {
        if let Some(span) = task_span(t) {
            out.extend(task_events(t, span.total_days(), span.days_within(window)));
        }
    }
    for l in leaves {
        let span = leave_span(l);
        out.extend(leave_events(l, span.total_days(), span.days_within(window)));
    }
    for p in projects {
        if let Some(span) = project_span(p) {
            out.extend(project_events(p, span.total_days(), span.days_within(window)));
        }
    }
    out
}
