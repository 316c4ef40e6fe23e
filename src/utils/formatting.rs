//! Formatting utilities used for CLI and export outputs.

use crate::models::calendar_event::{CalendarEvent, EventKind, HalfDayType};
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to `width` terminal columns (wide characters count double).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Cut to at most `max` terminal columns, marking the cut with "…".
pub fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for c in s.chars() {
        let cw = UnicodeWidthStr::width(c.to_string().as_str());
        if w + cw + 1 > max {
            break;
        }
        out.push(c);
        w += cw;
    }
    out.push('…');
    out
}

/// Short tag printed in front of a calendar line.
pub fn describe_kind(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Task => "TASK",
        EventKind::SimpleTask => "TODO",
        EventKind::Project => "PROJ",
        EventKind::Leave => "OFF",
    }
}

pub fn describe_half_day(h: Option<HalfDayType>) -> &'static str {
    match h {
        Some(HalfDayType::Morning) => "morning only",
        Some(HalfDayType::Afternoon) => "afternoon only",
        _ => "",
    }
}

/// Trailing details of a calendar line: span position, half day, status.
pub fn event_details(ev: &CalendarEvent) -> String {
    let mut parts: Vec<String> = Vec::new();
    let span = ev.span_label();
    if !span.is_empty() {
        parts.push(span);
    }
    let half = describe_half_day(ev.half_day_type);
    if !half.is_empty() {
        parts.push(half.to_string());
    }
    if let Some(s) = &ev.status {
        parts.push(s.clone());
    }
    if let Some(p) = ev.priority {
        parts.push(p.to_string());
    }
    parts.join(", ")
}
