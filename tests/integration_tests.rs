use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, rpl, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    rpl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rpl()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Tasks:"))
        .stdout(contains("20250402_0005_calendar_indexes"));

    // a second run finds nothing to do
    rpl()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Database schema is up to date."));
}

#[test]
fn test_calendar_shows_every_day_of_a_span() {
    let db_path = setup_test_db("calendar_every_day");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-10"))
        .stdout(contains("2025-03-12"))
        .stdout(contains("Write docs"))
        .stdout(contains("day 2/3"))
        .stdout(contains("alice (vacation)"))
        .stdout(contains("afternoon only"))
        .stdout(contains("Apollo"))
        .stdout(contains("Backlog idea").not());
}

#[test]
fn test_calendar_category_filter_keeps_leaves() {
    let db_path = setup_test_db("calendar_category_filter");
    init_db_with_data(&db_path);

    rpl()
        .args([
            "--db",
            &db_path,
            "calendar",
            "--period",
            "2025-03-01:2025-03-31",
            "--category",
            "simple_task",
        ])
        .assert()
        .success()
        .stdout(contains("Call vendor"))
        .stdout(contains("alice (vacation)"))
        .stdout(contains("Write docs").not())
        .stdout(contains("Apollo").not());
}

#[test]
fn test_calendar_type_and_project_filters() {
    let db_path = setup_test_db("calendar_type_project");
    init_db_with_data(&db_path);

    rpl()
        .args([
            "--db", &db_path, "calendar", "--period", "2025-03", "--type", "project",
        ])
        .assert()
        .success()
        .stdout(contains("Apollo"))
        .stdout(contains("alice").not())
        .stdout(contains("Write docs").not());

    rpl()
        .args([
            "--db", &db_path, "calendar", "--period", "2025-03", "--project", "1",
        ])
        .assert()
        .success()
        .stdout(contains("Write docs"))
        .stdout(contains("alice (vacation)"))
        .stdout(contains("Call vendor").not());
}

#[test]
fn test_calendar_hides_done_tasks_without_all() {
    let db_path = setup_test_db("calendar_done_tasks");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "task", "status", "1", "done"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Write docs").not());

    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-03", "--all"])
        .assert()
        .success()
        .stdout(contains("Write docs"));
}

#[test]
fn test_calendar_rejects_bad_period() {
    let db_path = setup_test_db("calendar_bad_period");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-03:2025-04-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_task_move_updates_board() {
    let db_path = setup_test_db("task_move_board");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "task", "move", "2", "--to", "review"])
        .assert()
        .success()
        .stdout(contains("moved to Review"))
        .stdout(contains("Review (1)"));

    rpl()
        .args(["--db", &db_path, "board"])
        .assert()
        .success()
        .stdout(contains("To do (2)"))
        .stdout(contains("Review (1)"))
        .stdout(contains("Call vendor"));

    rpl()
        .args(["--db", &db_path, "task", "move", "99", "--to", "done"])
        .assert()
        .failure()
        .stderr(contains("Task #99 not found"));
}

#[test]
fn test_board_project_filter() {
    let db_path = setup_test_db("board_project_filter");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "board", "--project", "1"])
        .assert()
        .success()
        .stdout(contains("Write docs"))
        .stdout(contains("Backlog idea").not());
}

#[test]
fn test_invalid_codes_are_rejected() {
    let db_path = setup_test_db("invalid_codes");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "task", "add", "X", "--priority", "extreme"])
        .assert()
        .failure()
        .stderr(contains("Invalid value for priority"));

    rpl()
        .args(["--db", &db_path, "task", "add", "X", "--start", "2025-02-30"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rpl()
        .args(["--db", &db_path, "task", "add", "X", "--project", "42"])
        .assert()
        .failure()
        .stderr(contains("Project #42 not found"));
}

#[test]
fn test_inverted_task_range_warns_and_shows_single_day() {
    let db_path = setup_test_db("inverted_range");
    init_db_with_data(&db_path);

    rpl()
        .args([
            "--db",
            &db_path,
            "task",
            "add",
            "Backwards",
            "--start",
            "2025-04-10",
            "--due",
            "2025-04-08",
        ])
        .assert()
        .success()
        .stderr(contains("precedes start date"));

    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-04"])
        .assert()
        .success()
        .stdout(contains("2025-04-10"))
        .stdout(contains("2025-04-08").not())
        .stdout(contains("1 event(s)"));
}

#[test]
fn test_delete_with_yes_and_log() {
    let db_path = setup_test_db("delete_with_yes");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "leave", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Leave #1 has been deleted."));

    rpl()
        .args(["--db", &db_path, "project", "del", "1", "-y"])
        .assert()
        .success();

    // the project's task survives without a project
    rpl()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(contains("Write docs"));

    rpl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("leave #1"))
        .stdout(contains("project #1"));
}

#[test]
fn test_leave_status_and_list() {
    let db_path = setup_test_db("leave_status_list");
    init_db_with_data(&db_path);

    rpl()
        .args(["--db", &db_path, "leave", "status", "1", "rejected"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "leave", "list", "--user", "alice"])
        .assert()
        .success()
        .stdout(contains("rejected"));

    // rejected leaves leave the calendar
    rpl()
        .args(["--db", &db_path, "calendar", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("alice").not());
}
