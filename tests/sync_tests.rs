//! End-to-end submission over real HTTP, against a one-shot in-test stub.

use predicates::str::contains;

mod common;
use common::{csc, init_test_db, setup_test_db, spawn_stub_server};

#[test]
fn test_submission_payload_and_success_path() {
    // Scenario B over the wire.
    let db_path = setup_test_db("http_ok");
    init_test_db(&db_path);

    let (base_url, server) = spawn_stub_server(200);

    csc()
        .args(["--db", &db_path, "--server", &base_url, "in", "--employee", "42"])
        .assert()
        .success()
        .stdout(contains("clock-in recorded"));

    let request = server.join().expect("stub server");

    assert!(request.starts_with("POST /attendance/clock"));
    assert!(request.contains(r#""employeeId":"42""#));
    assert!(request.contains(r#""action":"clockIn""#));
    assert!(request.contains(r#""location":null"#));
    assert!(request.contains(r#""idempotencyKey":""#));

    // The body is well-formed JSON with an RFC 3339 timestamp.
    let body_start = request.find("\r\n\r\n").expect("body") + 4;
    let body: serde_json::Value =
        serde_json::from_str(&request[body_start..]).expect("JSON body");
    let ts = body["timestamp"].as_str().expect("timestamp field");
    chrono::DateTime::parse_from_rfc3339(ts).expect("ISO-8601 timestamp");

    // Success never touches the queue.
    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("empty"));
}

#[test]
fn test_server_error_queues_event_with_zero_retries() {
    // Scenario C over the wire: HTTP 500 is absorbed, not fatal.
    let db_path = setup_test_db("http_500");
    init_test_db(&db_path);

    let (base_url, server) = spawn_stub_server(500);

    csc()
        .args(["--db", &db_path, "--server", &base_url, "out", "--employee", "42"])
        .assert()
        .success()
        .stdout(contains("saved locally"));

    server.join().expect("stub server");

    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("clock-out"))
        .stdout(contains("42"));
}

#[test]
fn test_sync_recovers_queued_event_when_server_returns() {
    let db_path = setup_test_db("http_recover");
    init_test_db(&db_path);

    // First attempt fails: the event lands in the queue.
    let (down_url, down) = spawn_stub_server(503);
    csc()
        .args(["--db", &db_path, "--server", &down_url, "in", "--employee", "7"])
        .assert()
        .success()
        .stdout(contains("saved locally"));
    down.join().expect("stub server");

    // The server comes back; sync drains the queue.
    let (up_url, up) = spawn_stub_server(200);
    csc()
        .args(["--db", &db_path, "--server", &up_url, "sync"])
        .assert()
        .success()
        .stdout(contains("synced"));

    let replay = up.join().expect("stub server");
    assert!(replay.contains(r#""employeeId":"7""#));

    csc()
        .args(["--db", &db_path, "--test", "queue"])
        .assert()
        .success()
        .stdout(contains("empty"));

    // The recovered event is now part of the local history.
    csc()
        .args(["--db", &db_path, "--test", "list", "--employee", "7"])
        .assert()
        .success()
        .stdout(contains("clock-in"));
}
