//! Persistence for the offline queue.
//!
//! The in-memory queue is scoped to one controller instance; a CLI
//! process is short-lived, so queue rows are written to `pending_events`
//! between invocations and rehydrated at startup (local outbox pattern).

use crate::errors::AppResult;
use crate::models::queued::QueuedEvent;
use chrono::Local;
use rusqlite::{Connection, params};

use super::pool::DbPool;
use super::queries::map_event_row;

/// Load every pending event in queue order (oldest first).
pub fn load_pending(pool: &mut DbPool) -> AppResult<Vec<QueuedEvent>> {
    let mut stmt = pool.conn.prepare(
        "SELECT employee_id, action, timestamp, lat, lng, idempotency_key,
                retry_count, queued_at AS synced_at
         FROM pending_events
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let (event, queued_at) = map_event_row(row)?;
        let retry_count: u32 = row.get("retry_count")?;
        Ok(QueuedEvent::restored(event, retry_count, queued_at))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Rewrite `pending_events` to mirror the in-memory queue after a pass.
/// Done in one transaction so a crash cannot drop and half-rewrite rows.
pub fn replace_pending(pool: &mut DbPool, queued: &[QueuedEvent]) -> AppResult<()> {
    let tx = pool.conn.transaction()?;

    tx.execute("DELETE FROM pending_events", [])?;

    for q in queued {
        tx.execute(
            "INSERT INTO pending_events
                (employee_id, action, timestamp, lat, lng, idempotency_key, retry_count, queued_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                q.event.employee_id,
                q.event.action.to_db_str(),
                q.event.timestamp,
                q.event.location.map(|c| c.lat),
                q.event.location.map(|c| c.lng),
                q.event.idempotency_key,
                q.retry_count,
                q.queued_at,
            ],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Park an event that exceeded the configured retry bound.
pub fn park_dead(conn: &Connection, queued: &QueuedEvent) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO dead_events
            (employee_id, action, timestamp, lat, lng, idempotency_key, retry_count, parked_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            queued.event.employee_id,
            queued.event.action.to_db_str(),
            queued.event.timestamp,
            queued.event.location.map(|c| c.lat),
            queued.event.location.map(|c| c.lng),
            queued.event.idempotency_key,
            queued.retry_count,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Dead-lettered events, oldest first.
pub fn load_dead(pool: &mut DbPool) -> AppResult<Vec<QueuedEvent>> {
    let mut stmt = pool.conn.prepare(
        "SELECT employee_id, action, timestamp, lat, lng, idempotency_key,
                retry_count, parked_at AS synced_at
         FROM dead_events
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let (event, parked_at) = map_event_row(row)?;
        let retry_count: u32 = row.get("retry_count")?;
        Ok(QueuedEvent::restored(event, retry_count, parked_at))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
