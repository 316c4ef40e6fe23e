use super::{category::TaskCategory, priority::Priority};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Task,
    Project,
    SimpleTask,
    Leave,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Task => "task",
            EventKind::Project => "project",
            EventKind::SimpleTask => "simple_task",
            EventKind::Leave => "leave",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "task" | "tasks" => Some(EventKind::Task),
            "project" | "projects" => Some(EventKind::Project),
            "simple_task" | "simple" => Some(EventKind::SimpleTask),
            "leave" | "leaves" => Some(EventKind::Leave),
            _ => None,
        }
    }

    /// Events tied to a project context (everything except leaves).
    pub fn is_work(&self) -> bool {
        !matches!(self, EventKind::Leave)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a day a leave covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayType {
    Morning,
    Afternoon,
    Full,
}

impl HalfDayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HalfDayType::Morning => "morning",
            HalfDayType::Afternoon => "afternoon",
            HalfDayType::Full => "full",
        }
    }
}

/// One displayable calendar entry for one day.
///
/// Derived from a task, project or leave on every load and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub status: Option<String>,
    pub priority: Option<Priority>,
    pub original_entity_id: i32,
    pub project_id: Option<i32>,
    pub service: Option<String>,
    pub category: Option<TaskCategory>,
    pub span_day: Option<u32>,
    pub total_span_days: Option<u32>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub half_day_type: Option<HalfDayType>,
}

impl CalendarEvent {
    pub fn event_id(kind: EventKind, entity_id: i32, date: NaiveDate) -> String {
        format!("{}-{}-{}", kind.as_str(), entity_id, date.format("%Y-%m-%d"))
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// "day N/M" label for multi-day spans, empty for single days.
    pub fn span_label(&self) -> String {
        match (self.span_day, self.total_span_days) {
            (Some(day), Some(total)) if total > 1 => format!("day {}/{}", day, total),
            _ => String::new(),
        }
    }

    pub fn time_range(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => format!("{}-{}", s.format("%H:%M"), e.format("%H:%M")),
            (Some(s), None) => s.format("%H:%M").to_string(),
            _ => "--:--".to_string(),
        }
    }
}
