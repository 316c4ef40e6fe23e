use crate::db::db_utils::{get_code, get_date};
use crate::errors::{AppError, AppResult};
use crate::models::leave::{Leave, LeaveKind};
use crate::models::status::LeaveStatus;
use crate::utils::date::DateWindow;
use rusqlite::{Connection, OptionalExtension, Row, params};

const LEAVE_COLUMNS: &str = "id, user, kind, status, start_date, end_date,
     half_day_start, half_day_end, note, created_at";

pub fn map_leave(row: &Row) -> rusqlite::Result<Leave> {
    Ok(Leave {
        id: row.get("id")?,
        user: row.get("user")?,
        kind: get_code(row, "kind", LeaveKind::from_db_str)?,
        status: get_code(row, "status", LeaveStatus::from_db_str)?,
        start_date: get_date(row, "start_date")?,
        end_date: get_date(row, "end_date")?,
        half_day_start: row.get::<_, i32>("half_day_start")? == 1,
        half_day_end: row.get::<_, i32>("half_day_end")? == 1,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_leave(conn: &Connection, l: &Leave) -> AppResult<i32> {
    conn.execute(
        "INSERT INTO leaves (user, kind, status, start_date, end_date,
                             half_day_start, half_day_end, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            l.user,
            l.kind.to_db_str(),
            l.status.to_db_str(),
            l.start_date.format("%Y-%m-%d").to_string(),
            l.end_date.format("%Y-%m-%d").to_string(),
            if l.half_day_start { 1 } else { 0 },
            if l.half_day_end { 1 } else { 0 },
            l.note,
            l.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid() as i32)
}

pub fn find_leave(conn: &Connection, id: i32) -> AppResult<Leave> {
    let sql = format!("SELECT {LEAVE_COLUMNS} FROM leaves WHERE id = ?1");
    conn.query_row(&sql, [id], map_leave)
        .optional()?
        .ok_or(AppError::NotFound { entity: "Leave", id })
}

/// Leaves of one user (or everybody), ordered by start date.
pub fn load_leaves(conn: &Connection, user: Option<&str>) -> AppResult<Vec<Leave>> {
    let sql = format!(
        "SELECT {LEAVE_COLUMNS} FROM leaves
         WHERE (?1 IS NULL OR user = ?1)
         ORDER BY start_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([user], map_leave)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Leaves touching the window. An inverted range counts as its start day.
pub fn load_leaves_in(conn: &Connection, window: &DateWindow) -> AppResult<Vec<Leave>> {
    let sql = format!(
        "SELECT {LEAVE_COLUMNS} FROM leaves
         WHERE start_date <= ?2 AND max(start_date, end_date) >= ?1
         ORDER BY start_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![window.start_str(), window.end_str()], map_leave)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_leave_status(conn: &Connection, id: i32, status: LeaveStatus) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE leaves SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound { entity: "Leave", id });
    }
    Ok(())
}

pub fn delete_leave(conn: &Connection, id: i32) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM leaves WHERE id = ?1", [id])?;
    Ok(n > 0)
}
