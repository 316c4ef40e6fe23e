use super::{category::TaskCategory, priority::Priority, status::TaskStatus};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub project_id: Option<i32>,    // ⇔ tasks.project_id (NULL = no project)
    pub service: Option<String>,    // ⇔ tasks.service
    pub category: TaskCategory,     // ⇔ tasks.category ('task' | 'simple_task')
    pub status: TaskStatus,         // ⇔ tasks.status
    pub priority: Priority,         // ⇔ tasks.priority
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub position: i32,              // order inside the kanban column
    pub created_at: String,         // ISO8601
}

impl Task {
    /// Build a new, not yet persisted task (`id = 0`) with default fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            project_id: None,
            service: None,
            category: TaskCategory::Task,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            start_date: None,
            due_date: None,
            start_time: None,
            end_time: None,
            position: 0,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Calendar day the task was created on, if `created_at` is a valid timestamp.
    pub fn created_date(&self) -> Option<NaiveDate> {
        created_date(&self.created_at)
    }

    /// Tasks without any scheduling date live only on the board.
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() || self.due_date.is_some()
    }
}

pub(crate) fn created_date(created_at: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(created_at.get(..10)?, "%Y-%m-%d").ok())
}
