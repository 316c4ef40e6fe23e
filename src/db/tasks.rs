use crate::core::board::Placement;
use crate::db::db_utils::{date_to_db, get_code, get_opt_date, get_opt_time, time_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::category::TaskCategory;
use crate::models::priority::Priority;
use crate::models::status::TaskStatus;
use crate::models::task::Task;
use rusqlite::{Connection, OptionalExtension, Row, params};

const TASK_COLUMNS: &str = "id, title, project_id, service, category, status, priority,
     start_date, due_date, start_time, end_time, position, created_at";

pub fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        project_id: row.get("project_id")?,
        service: row.get("service")?,
        category: get_code(row, "category", TaskCategory::from_db_str)?,
        status: get_code(row, "status", TaskStatus::from_db_str)?,
        priority: get_code(row, "priority", Priority::from_db_str)?,
        start_date: get_opt_date(row, "start_date")?,
        due_date: get_opt_date(row, "due_date")?,
        start_time: get_opt_time(row, "start_time")?,
        end_time: get_opt_time(row, "end_time")?,
        position: row.get("position")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a task and return its new id.
pub fn insert_task(conn: &Connection, t: &Task) -> AppResult<i32> {
    conn.execute(
        "INSERT INTO tasks (title, project_id, service, category, status, priority,
                            start_date, due_date, start_time, end_time, position, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            t.title,
            t.project_id,
            t.service,
            t.category.to_db_str(),
            t.status.to_db_str(),
            t.priority.to_db_str(),
            date_to_db(t.start_date),
            date_to_db(t.due_date),
            time_to_db(t.start_time),
            time_to_db(t.end_time),
            t.position,
            t.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid() as i32)
}

pub fn find_task(conn: &Connection, id: i32) -> AppResult<Task> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    conn.query_row(&sql, [id], map_task)
        .optional()?
        .ok_or(AppError::NotFound { entity: "Task", id })
}

/// All tasks, optionally restricted to one project.
pub fn load_tasks(conn: &Connection, project_id: Option<i32>) -> AppResult<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE (?1 IS NULL OR project_id = ?1)
         ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([project_id], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Tasks carrying a start or due date, i.e. the ones the calendar can place.
pub fn load_scheduled_tasks(conn: &Connection) -> AppResult<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE start_date IS NOT NULL OR due_date IS NOT NULL
         ORDER BY COALESCE(start_date, due_date) ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Position for a card appended to the given column.
pub fn next_position(conn: &Connection, status: TaskStatus) -> AppResult<i32> {
    let pos: i32 = conn.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE status = ?1",
        [status.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(pos)
}

/// Move a task to the end of the `status` column and close the gap it
/// leaves in its previous column.
pub fn update_task_status(conn: &Connection, id: i32, status: TaskStatus) -> AppResult<()> {
    let current = find_task(conn, id)?;

    let tx = conn.unchecked_transaction()?;
    let position = next_position(&tx, status)?;
    tx.execute(
        "UPDATE tasks SET status = ?1, position = ?2 WHERE id = ?3",
        params![status.to_db_str(), position, id],
    )?;
    renumber_column(&tx, current.status)?;
    if current.status != status {
        renumber_column(&tx, status)?;
    }
    tx.commit()?;
    Ok(())
}

/// Rewrite the positions of one column as 0, 1, 2, ... keeping their order.
fn renumber_column(conn: &Connection, status: TaskStatus) -> AppResult<()> {
    let ids: Vec<i32> = {
        let mut stmt =
            conn.prepare("SELECT id FROM tasks WHERE status = ?1 ORDER BY position ASC, id ASC")?;
        stmt.query_map([status.to_db_str()], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i32>>>()?
    };

    let mut update = conn.prepare_cached("UPDATE tasks SET position = ?1 WHERE id = ?2")?;
    for (pos, id) in ids.iter().enumerate() {
        update.execute(params![pos as i32, id])?;
    }
    Ok(())
}

/// Write status and position of several tasks atomically.
pub fn save_placements(conn: &mut Connection, placements: &[Placement]) -> AppResult<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt =
            tx.prepare_cached("UPDATE tasks SET status = ?1, position = ?2 WHERE id = ?3")?;
        for p in placements {
            let changed = stmt.execute(params![p.status.to_db_str(), p.position, p.task_id])?;
            if changed == 0 {
                return Err(AppError::NotFound {
                    entity: "Task",
                    id: p.task_id,
                });
            }
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn delete_task(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(n > 0)
}
