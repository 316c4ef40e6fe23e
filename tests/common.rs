#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rpl() -> Command {
    cargo_bin_cmd!("rplanner")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rplanner.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Initialize the DB and add a small March 2025 dataset:
/// - project #1 "Apollo" 2025-03-01..2025-03-03
/// - task #1 "Write docs" 2025-03-10..2025-03-12 at 09:00, project 1
/// - task #2 "Call vendor" simple task on 2025-03-11 at 14:00
/// - task #3 "Backlog idea" without dates
/// - leave #1 alice 2025-03-11..2025-03-12, approved, starting at midday
pub fn init_db_with_data(db_path: &str) {
    rpl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rpl()
        .args([
            "--db",
            db_path,
            "project",
            "add",
            "Apollo",
            "--service",
            "web",
            "--start",
            "2025-03-01",
            "--end",
            "2025-03-03",
        ])
        .assert()
        .success();

    rpl()
        .args([
            "--db",
            db_path,
            "task",
            "add",
            "Write docs",
            "--project",
            "1",
            "--service",
            "web",
            "--start",
            "2025-03-10",
            "--due",
            "2025-03-12",
            "--from",
            "09:00",
            "--to",
            "10:30",
            "--priority",
            "high",
        ])
        .assert()
        .success();

    rpl()
        .args([
            "--db",
            db_path,
            "task",
            "add",
            "Call vendor",
            "--category",
            "simple_task",
            "--start",
            "2025-03-11",
            "--from",
            "14:00",
        ])
        .assert()
        .success();

    rpl()
        .args(["--db", db_path, "task", "add", "Backlog idea"])
        .assert()
        .success();

    rpl()
        .args([
            "--db",
            db_path,
            "leave",
            "add",
            "2025-03-11",
            "2025-03-12",
            "--user",
            "alice",
            "--status",
            "approved",
            "--half-start",
        ])
        .assert()
        .success();
}
