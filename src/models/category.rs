use serde::{Deserialize, Serialize};
use std::fmt;

/// Task category: full project tasks vs. lightweight "simple" tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Task,
    SimpleTask,
}

impl TaskCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskCategory::Task => "task",
            TaskCategory::SimpleTask => "simple_task",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "task" => Some(TaskCategory::Task),
            "simple_task" => Some(TaskCategory::SimpleTask),
            _ => None,
        }
    }

    /// Accepts `task`, `simple_task`, `simple`, `SIMPLE_TASK`, `simple-task`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "simple" => Some(TaskCategory::SimpleTask),
            other => Self::from_db_str(other),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
