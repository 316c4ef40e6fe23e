//! SQLite-backed calendar source and board writer.

use crate::core::board::{Placement, TaskWriter};
use crate::core::calendar::CalendarSource;
use crate::core::calendar::expander::{project_span, task_span};
use crate::db::pool::DbPool;
use crate::db::{leaves, projects, tasks};
use crate::errors::AppResult;
use crate::models::leave::Leave;
use crate::models::project::Project;
use crate::models::task::Task;
use crate::utils::date::DateWindow;

impl CalendarSource for DbPool {
    fn tasks_in(&mut self, window: &DateWindow) -> AppResult<Vec<Task>> {
        let mut all = tasks::load_scheduled_tasks(&self.conn)?;
        all.retain(|t| task_span(t).is_some_and(|s| window.overlaps(s.start, s.end)));
        Ok(all)
    }

    fn leaves_in(&mut self, window: &DateWindow) -> AppResult<Vec<Leave>> {
        leaves::load_leaves_in(&self.conn, window)
    }

    fn projects_in(&mut self, window: &DateWindow) -> AppResult<Vec<Project>> {
        let mut all = projects::load_projects(&self.conn)?;
        all.retain(|p| project_span(p).is_some_and(|s| window.overlaps(s.start, s.end)));
        Ok(all)
    }
}

impl TaskWriter for DbPool {
    fn save_placements(&mut self, placements: &[Placement]) -> AppResult<()> {
        tasks::save_placements(&mut self.conn, placements)
    }
}
