use crate::db::db_utils::{date_to_db, get_code, get_opt_date};
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::status::ProjectStatus;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashSet;

const PROJECT_COLUMNS: &str = "id, name, service, status, start_date, end_date, created_at";

pub fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        service: row.get("service")?,
        status: get_code(row, "status", ProjectStatus::from_db_str)?,
        start_date: get_opt_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_project(conn: &Connection, p: &Project) -> AppResult<i32> {
    conn.execute(
        "INSERT INTO projects (name, service, status, start_date, end_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.name,
            p.service,
            p.status.to_db_str(),
            date_to_db(p.start_date),
            date_to_db(p.end_date),
            p.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid() as i32)
}

pub fn find_project(conn: &Connection, id: i32) -> AppResult<Project> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
    conn.query_row(&sql, [id], map_project)
        .optional()?
        .ok_or(AppError::NotFound {
            entity: "Project",
            id,
        })
}

pub fn load_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn project_ids(conn: &Connection) -> AppResult<HashSet<i32>> {
    let mut stmt = conn.prepare("SELECT id FROM projects")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<i32>>>()?;
    Ok(ids)
}

/// Delete a project. Its tasks are kept and detached from it.
pub fn delete_project(conn: &mut Connection, id: i32) -> AppResult<bool> {
    let tx = conn.transaction()?;
    tx.execute(
        "UPDATE tasks SET project_id = NULL WHERE project_id = ?1",
        [id],
    )?;
    let n = tx.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    tx.commit()?;
    Ok(n > 0)
}
