use super::status::LeaveStatus;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    Vacation,
    Sick,
    Personal,
    Other,
}

impl LeaveKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveKind::Vacation => "vacation",
            LeaveKind::Sick => "sick",
            LeaveKind::Personal => "personal",
            LeaveKind::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "vacation" => Some(LeaveKind::Vacation),
            "sick" => Some(LeaveKind::Sick),
            "personal" => Some(LeaveKind::Personal),
            "other" => Some(LeaveKind::Other),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "v" | "holiday" => Some(LeaveKind::Vacation),
            "s" | "illness" => Some(LeaveKind::Sick),
            "p" => Some(LeaveKind::Personal),
            other => Self::from_db_str(other),
        }
    }
}

impl fmt::Display for LeaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

/// An absence of one user over an inclusive date range.
///
/// `half_day_start` means the leave begins at midday on `start_date`;
/// `half_day_end` means it ends at midday on `end_date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leave {
    pub id: i32,
    pub user: String,
    pub kind: LeaveKind,
    pub status: LeaveStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub half_day_start: bool,
    pub half_day_end: bool,
    pub note: String,
    pub created_at: String,
}

impl Leave {
    pub fn new(user: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            user: user.into(),
            kind: LeaveKind::Vacation,
            status: LeaveStatus::Pending,
            start_date,
            end_date,
            half_day_start: false,
            half_day_end: false,
            note: String::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} ({})", self.user, self.kind)
    }
}
