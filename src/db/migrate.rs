use crate::ui::messages::{info, success};
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step, recorded in the `log` table once applied.
struct Migration {
    version: &'static str,
    message: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250110_0001_create_projects",
        message: "Created projects table",
        apply: create_projects_table,
    },
    Migration {
        version: "20250110_0002_create_tasks",
        message: "Created tasks table",
        apply: create_tasks_table,
    },
    Migration {
        version: "20250110_0003_create_leaves",
        message: "Created leaves table",
        apply: create_leaves_table,
    },
    Migration {
        version: "20250315_0004_add_task_position",
        message: "Added kanban position to tasks",
        apply: add_task_position_column,
    },
    Migration {
        version: "20250402_0005_calendar_indexes",
        message: "Added calendar lookup indexes",
        apply: create_calendar_indexes,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_projects_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            service     TEXT,
            status      TEXT NOT NULL DEFAULT 'active'
                        CHECK(status IN ('planned','active','on_hold','completed')),
            start_date  TEXT,
            end_date    TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    )
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            project_id  INTEGER,
            service     TEXT,
            category    TEXT NOT NULL DEFAULT 'task'
                        CHECK(category IN ('task','simple_task')),
            status      TEXT NOT NULL DEFAULT 'todo'
                        CHECK(status IN ('todo','in_progress','review','done')),
            priority    TEXT NOT NULL DEFAULT 'medium'
                        CHECK(priority IN ('low','medium','high','urgent')),
            start_date  TEXT,
            due_date    TEXT,
            start_time  TEXT,
            end_time    TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    )
}

fn create_leaves_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS leaves (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user            TEXT NOT NULL,
            kind            TEXT NOT NULL DEFAULT 'vacation'
                            CHECK(kind IN ('vacation','sick','personal','other')),
            status          TEXT NOT NULL DEFAULT 'pending'
                            CHECK(status IN ('pending','approved','rejected')),
            start_date      TEXT NOT NULL,
            end_date        TEXT NOT NULL,
            half_day_start  INTEGER NOT NULL DEFAULT 0,
            half_day_end    INTEGER NOT NULL DEFAULT 0,
            note            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );
        "#,
    )
}

/// Check if a table has the given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn add_task_position_column(conn: &Connection) -> Result<()> {
    if has_column(conn, "tasks", "position")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE tasks ADD COLUMN position INTEGER NOT NULL DEFAULT 0;",
        [],
    )?;

    // Existing cards keep their creation order inside each column.
    conn.execute_batch(
        r#"
        UPDATE tasks SET position = (
            SELECT COUNT(*) FROM tasks t2
            WHERE t2.status = tasks.status AND t2.id < tasks.id
        );
        "#,
    )
}

fn create_calendar_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_dates ON tasks(start_date, due_date);
        CREATE INDEX IF NOT EXISTS idx_tasks_status_position ON tasks(status, position);
        CREATE INDEX IF NOT EXISTS idx_leaves_dates ON leaves(start_date, end_date);
        CREATE INDEX IF NOT EXISTS idx_projects_dates ON projects(start_date, end_date);
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions of the migrations already recorded in the `log` table.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs in its own transaction together with its log row, so
/// a failing step leaves the previous ones in place and is retried next time.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        (m.apply)(&tx)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.message],
        )?;
        tx.commit()?;

        success(format!("Migration applied: {} → {}", m.version, m.message));
        applied += 1;
    }

    if applied == 0 {
        info("Database schema is up to date.");
    }

    Ok(())
}
