use super::status::ProjectStatus;
use super::task::created_date;
use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub service: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            service: None,
            status: ProjectStatus::Active,
            start_date: None,
            end_date: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        created_date(&self.created_at)
    }
}
