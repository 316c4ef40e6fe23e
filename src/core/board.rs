//! Kanban board over task statuses with optimistic moves.

use crate::errors::{AppError, AppResult};
use crate::models::status::TaskStatus;
use crate::models::task::Task;
use crate::ui::messages::error;
use std::collections::BTreeMap;

/// Column and order of one task after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub task_id: i32,
    pub status: TaskStatus,
    pub position: i32,
}

/// Persists board changes.
pub trait TaskWriter {
    fn save_placements(&mut self, placements: &[Placement]) -> AppResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: BTreeMap<TaskStatus, Vec<Task>>,
}

impl Board {
    /// One column per status in workflow order, cards ordered by position then id.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut columns: BTreeMap<TaskStatus, Vec<Task>> =
            TaskStatus::ALL.iter().map(|s| (*s, Vec::new())).collect();

        for task in tasks {
            columns.entry(task.status).or_default().push(task);
        }
        for column in columns.values_mut() {
            column.sort_by_key(|t| (t.position, t.id));
        }

        Self { columns }
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        self.columns.iter().map(|(s, c)| (*s, c.as_slice()))
    }

    pub fn task_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Column and index of a task.
    pub fn find(&self, task_id: i32) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|(status, column)| {
            column
                .iter()
                .position(|t| t.id == task_id)
                .map(|idx| (*status, idx))
        })
    }

    /// Apply a move to local state only and return the placements of every
    /// card in the touched columns.
    ///
    /// `index` is clamped to the target column; `None` appends.
    pub fn apply_move(
        &mut self,
        task_id: i32,
        to: TaskStatus,
        index: Option<usize>,
    ) -> AppResult<Vec<Placement>> {
        let (from, idx) = self.find(task_id).ok_or(AppError::NotFound {
            entity: "Task",
            id: task_id,
        })?;

        let mut task = self
            .columns
            .get_mut(&from)
            .map(|c| c.remove(idx))
            .ok_or_else(|| AppError::Board(format!("missing column {from}")))?;
        task.status = to;

        let target = self.columns.entry(to).or_default();
        let at = index.unwrap_or(target.len()).min(target.len());
        target.insert(at, task);

        let touched = if from == to { vec![to] } else { vec![from, to] };

        let mut placements = Vec::new();
        for status in touched {
            if let Some(column) = self.columns.get_mut(&status) {
                for (pos, t) in column.iter_mut().enumerate() {
                    t.position = pos as i32;
                    placements.push(Placement {
                        task_id: t.id,
                        status,
                        position: t.position,
                    });
                }
            }
        }

        Ok(placements)
    }

    /// Optimistic move: update the board first, then persist through `writer`.
    /// When persisting fails the board is restored to its previous state and
    /// the error is returned.
    pub fn move_task<W: TaskWriter>(
        &mut self,
        writer: &mut W,
        task_id: i32,
        to: TaskStatus,
        index: Option<usize>,
    ) -> AppResult<()> {
        let snapshot = self.columns.clone();
        let placements = self.apply_move(task_id, to, index)?;

        if let Err(e) = writer.save_placements(&placements) {
            self.columns = snapshot;
            error(format!("Failed to move task #{task_id}, board restored: {e}"));
            return Err(e);
        }

        Ok(())
    }
}
