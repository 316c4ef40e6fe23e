mod common;
use common::{rpl, setup_test_db, temp_out};

use predicates::str::contains;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

fn backup_targets(db_path: &str) -> Vec<String> {
    let conn = Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT target FROM log WHERE operation = 'backup' ORDER BY id")
        .expect("prepare");
    stmt.query_map([], |row| row.get(0))
        .expect("query")
        .collect::<rusqlite::Result<Vec<String>>>()
        .expect("rows")
}

#[test]
fn test_backup_plain_copy() {
    let db_path = setup_test_db("backup_plain");
    let dest = temp_out("backup_plain", "sqlite");

    rpl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let original = fs::read(&db_path).expect("read db");
    let copy = fs::read(&dest).expect("read backup");
    assert!(copy.starts_with(b"SQLite format 3"));
    assert!(!original.is_empty());

    assert_eq!(backup_targets(&db_path), [dest]);
}

#[test]
fn test_backup_compressed_writes_only_the_zip() {
    let db_path = setup_test_db("backup_zip");
    let dest = temp_out("backup_zip", "sqlite");
    let zip_path = temp_out("backup_zip", "zip");

    rpl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("backup_zip_out.zip"));

    assert!(!Path::new(&dest).exists());
    let archive = fs::read(&zip_path).expect("read zip");
    assert!(archive.starts_with(b"PK"));

    assert_eq!(backup_targets(&db_path), [zip_path]);
}

#[test]
fn test_backup_compressed_asks_before_replacing_existing_zip() {
    let db_path = setup_test_db("backup_zip_exists");
    let dest = temp_out("backup_zip_exists", "sqlite");
    let zip_path = temp_out("backup_zip_exists", "zip");
    fs::write(&zip_path, "keep me").expect("write zip");

    rpl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Backup cancelled by user."))
        .stderr(contains("already exists"));

    assert_eq!(fs::read_to_string(&zip_path).expect("read zip"), "keep me");
    assert!(backup_targets(&db_path).is_empty());
}

#[test]
fn test_backup_rejects_relative_path() {
    let db_path = setup_test_db("backup_relative");

    rpl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rpl()
        .args(["--db", &db_path, "backup", "--file", "backup.sqlite"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
