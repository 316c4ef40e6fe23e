/// ANSI color helper utilities for terminal output.
use crate::models::calendar_event::{EventKind, HalfDayType};
use crate::models::priority::Priority;
use crate::models::status::TaskStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";
pub const HOLIDAY: &str = "\x1b[45;97;1m";

pub fn color_for_kind(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Task => BLUE,
        EventKind::SimpleTask => CYAN,
        EventKind::Project => MAGENTA,
        EventKind::Leave => HOLIDAY,
    }
}

pub fn color_for_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => GREY,
        Priority::Medium => RESET,
        Priority::High => YELLOW,
        Priority::Urgent => RED,
    }
}

pub fn color_for_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Todo => RESET,
        TaskStatus::InProgress => YELLOW,
        TaskStatus::Review => CYAN,
        TaskStatus::Done => GREEN,
    }
}

/// Half days are dimmed so full absences stand out.
pub fn color_for_half_day(h: Option<HalfDayType>) -> &'static str {
    match h {
        Some(HalfDayType::Morning) | Some(HalfDayType::Afternoon) => GREY,
        _ => RESET,
    }
}

/// Returns formatted grey text for empty placeholders.
///
/// Example:
/// `colorize_optional("--:--")` → "<grey>--:--<reset>"
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
