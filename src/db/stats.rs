use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ENTITY COUNTS
    //
    for (label, table) in [("Projects", "projects"), ("Tasks", "tasks"), ("Leaves", "leaves")] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let backlog: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE start_date IS NULL AND due_date IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Unscheduled tasks:{} {}", CYAN, RESET, backlog);

    //
    // 3) PLANNED RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(d) FROM (
                SELECT COALESCE(start_date, due_date) AS d FROM tasks
                UNION ALL SELECT start_date FROM leaves
                UNION ALL SELECT start_date FROM projects
             ) WHERE d IS NOT NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(d) FROM (
                SELECT COALESCE(due_date, start_date) AS d FROM tasks
                UNION ALL SELECT end_date FROM leaves
                UNION ALL SELECT end_date FROM projects
             ) WHERE d IS NOT NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Planned range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
