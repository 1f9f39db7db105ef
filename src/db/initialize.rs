use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the schema if missing. Statements are idempotent, so this is
/// safe to run on every open.
///
/// - `events`:         locally recorded history of submitted events
/// - `pending_events`: the offline queue, persisted between invocations
/// - `dead_events`:    events parked after exceeding max_retries
/// - `day_cache`:      cached per-(employee, day) attendance views
/// - `log`:            internal operation log
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     TEXT NOT NULL,
            action          TEXT NOT NULL,
            timestamp       TEXT NOT NULL,
            lat             REAL,
            lng             REAL,
            idempotency_key TEXT NOT NULL UNIQUE,
            synced_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pending_events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     TEXT NOT NULL,
            action          TEXT NOT NULL,
            timestamp       TEXT NOT NULL,
            lat             REAL,
            lng             REAL,
            idempotency_key TEXT NOT NULL UNIQUE,
            retry_count     INTEGER NOT NULL DEFAULT 0,
            queued_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dead_events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id     TEXT NOT NULL,
            action          TEXT NOT NULL,
            timestamp       TEXT NOT NULL,
            lat             REAL,
            lng             REAL,
            idempotency_key TEXT NOT NULL UNIQUE,
            retry_count     INTEGER NOT NULL,
            parked_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS day_cache (
            employee_id TEXT NOT NULL,
            date        TEXT NOT NULL,
            payload     TEXT NOT NULL,
            fetched_at  TEXT NOT NULL,
            PRIMARY KEY (employee_id, date)
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT NOT NULL,
            message   TEXT NOT NULL
        );",
    )?;

    Ok(())
}
