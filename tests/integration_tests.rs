//! CLI-level tests: init, config, validation, the offline path against a
//! closed port, and queue/log output.

use predicates::str::contains;

mod common;
use common::{csc, init_test_db, refused_server, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    csc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_config_print_shows_settings() {
    csc()
        .args(["--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("server_url"))
        .stdout(contains("retry_warn_threshold"));
}

#[test]
fn test_clock_in_without_employee_is_a_hard_error() {
    // Scenario A: validation failures are fatal to the action.
    let db_path = setup_test_db("no_employee");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "in"])
        .assert()
        .failure()
        .stderr(contains("employee"));

    // No event was queued.
    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("empty"));
}

#[test]
fn test_queue_empty_message() {
    let db_path = setup_test_db("queue_empty");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("offline queue is empty"));
}

#[test]
fn test_clock_in_mock_records_event_locally() {
    let db_path = setup_test_db("mock_in");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "in", "--employee", "42"])
        .assert()
        .success()
        .stdout(contains("clock-in recorded"));

    // Queue stays empty on success; history shows the event.
    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("empty"));

    csc()
        .args(["--db", &db_path, "--test", "list", "--employee", "42"])
        .assert()
        .success()
        .stdout(contains("42"))
        .stdout(contains("clock-in"));
}

#[test]
fn test_unreachable_server_queues_event() {
    let db_path = setup_test_db("offline_in");
    init_test_db(&db_path);

    csc()
        .args([
            "--db",
            &db_path,
            "--server",
            refused_server(),
            "out",
            "--employee",
            "42",
        ])
        .assert()
        .success()
        .stdout(contains("saved locally"));

    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("42"))
        .stdout(contains("clock-out"))
        .stdout(contains("0"));
}

#[test]
fn test_sync_against_dead_server_bumps_retry_count() {
    let db_path = setup_test_db("offline_sync");
    init_test_db(&db_path);

    csc()
        .args([
            "--db",
            &db_path,
            "--server",
            refused_server(),
            "in",
            "--employee",
            "7",
        ])
        .assert()
        .success()
        .stdout(contains("saved locally"));

    csc()
        .args(["--db", &db_path, "--server", refused_server(), "sync"])
        .assert()
        .success()
        .stdout(contains("still pending"));

    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("1"));
}

#[test]
fn test_sync_with_empty_queue_is_a_noop() {
    let db_path = setup_test_db("sync_empty");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--server", refused_server(), "sync"])
        .assert()
        .success()
        .stdout(contains("nothing to sync"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("oplog");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "in", "--employee", "42"])
        .assert()
        .success();

    csc()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("42"));
}

#[test]
fn test_list_unknown_date_reports_no_events() {
    let db_path = setup_test_db("list_empty");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "list", "1999-01-01"])
        .assert()
        .success()
        .stdout(contains("No events for 1999-01-01"));
}

#[test]
fn test_list_rejects_malformed_date() {
    let db_path = setup_test_db("list_bad_date");
    init_test_db(&db_path);

    csc()
        .args(["--db", &db_path, "--test", "list", "not-a-date"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}
