// src/export/model.rs

use crate::models::calendar_event::CalendarEvent;
use serde::Serialize;

/// Flat row of one exported calendar event. Missing values are empty strings
/// so CSV, JSON and XLSX share the same columns.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CalendarEventExport {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub entity_id: i32,
    pub project_id: String,
    pub service: String,
    pub category: String,
    pub span_day: String,
    pub total_span_days: String,
    pub start_time: String,
    pub end_time: String,
    pub half_day: String,
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl From<&CalendarEvent> for CalendarEventExport {
    fn from(ev: &CalendarEvent) -> Self {
        Self {
            id: ev.id.clone(),
            date: ev.date_str(),
            kind: ev.kind.as_str().to_string(),
            title: ev.title.clone(),
            status: ev.status.clone().unwrap_or_default(),
            priority: opt(ev.priority),
            entity_id: ev.original_entity_id,
            project_id: opt(ev.project_id),
            service: ev.service.clone().unwrap_or_default(),
            category: opt(ev.category),
            span_day: opt(ev.span_day),
            total_span_days: opt(ev.total_span_days),
            start_time: opt(ev.start_time.map(|t| t.format("%H:%M"))),
            end_time: opt(ev.end_time.map(|t| t.format("%H:%M"))),
            half_day: opt(ev.half_day_type.map(|h| h.as_str())),
        }
    }
}

/// Column headers, in field order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "kind",
        "title",
        "status",
        "priority",
        "entity_id",
        "project_id",
        "service",
        "category",
        "span_day",
        "total_span_days",
        "start_time",
        "end_time",
        "half_day",
    ]
}

pub(crate) fn event_to_row(e: &CalendarEventExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.date.clone(),
        e.kind.clone(),
        e.title.clone(),
        e.status.clone(),
        e.priority.clone(),
        e.entity_id.to_string(),
        e.project_id.clone(),
        e.service.clone(),
        e.category.clone(),
        e.span_day.clone(),
        e.total_span_days.clone(),
        e.start_time.clone(),
        e.end_time.clone(),
        e.half_day.clone(),
    ]
}
