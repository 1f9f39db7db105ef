//! Queries over the local event history and the day cache.

use crate::core::controller::CacheInvalidator;
use crate::errors::{AppError, AppResult};
use crate::models::{action::ClockAction, coordinates::Coordinates, event::ClockEvent};
use crate::ui::messages;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, params};

/// Record a successfully submitted event in the local history.
/// The idempotency key is UNIQUE, so recording the same event twice
/// (fresh submit + later drain bookkeeping) is a no-op.
pub fn record_event(conn: &Connection, ev: &ClockEvent) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO events
            (employee_id, action, timestamp, lat, lng, idempotency_key, synced_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            ev.employee_id,
            ev.action.to_db_str(),
            ev.timestamp,
            ev.location.map(|c| c.lat),
            ev.location.map(|c| c.lng),
            ev.idempotency_key,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn map_event_row(row: &Row) -> rusqlite::Result<(ClockEvent, String)> {
    let action_str: String = row.get("action")?;
    let action = ClockAction::from_db_str(&action_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidAction(action_str.clone())),
        )
    })?;

    let lat: Option<f64> = row.get("lat")?;
    let lng: Option<f64> = row.get("lng")?;
    let location = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };

    let event = ClockEvent {
        employee_id: row.get("employee_id")?,
        action,
        timestamp: row.get("timestamp")?,
        location,
        idempotency_key: row.get("idempotency_key")?,
    };
    let synced_at: String = row.get("synced_at")?;

    Ok((event, synced_at))
}

/// Locally recorded events for one day, oldest first, optionally
/// filtered by employee. Returns (event, synced_at) pairs.
pub fn load_events_by_date(
    conn: &Connection,
    date: &NaiveDate,
    employee_id: Option<&str>,
) -> AppResult<Vec<(ClockEvent, String)>> {
    let day_prefix = format!("{}%", date.format("%Y-%m-%d"));

    let mut out = Vec::new();
    if let Some(emp) = employee_id {
        let mut stmt = conn.prepare(
            "SELECT employee_id, action, timestamp, lat, lng, idempotency_key, synced_at
             FROM events
             WHERE timestamp LIKE ?1 AND employee_id = ?2
             ORDER BY timestamp ASC",
        )?;
        let rows = stmt.query_map(params![day_prefix, emp], map_event_row)?;
        for r in rows {
            out.push(r?);
        }
    } else {
        let mut stmt = conn.prepare(
            "SELECT employee_id, action, timestamp, lat, lng, idempotency_key, synced_at
             FROM events
             WHERE timestamp LIKE ?1
             ORDER BY timestamp ASC",
        )?;
        let rows = stmt.query_map(params![day_prefix], map_event_row)?;
        for r in rows {
            out.push(r?);
        }
    }

    Ok(out)
}

/// Store a rendered attendance view for (employee, day).
pub fn cache_day_view(
    conn: &Connection,
    employee_id: &str,
    date: &str,
    payload: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO day_cache (employee_id, date, payload, fetched_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![employee_id, date, payload, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn load_day_view(
    conn: &Connection,
    employee_id: &str,
    date: &str,
) -> AppResult<Option<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT payload FROM day_cache WHERE employee_id = ?1 AND date = ?2")?;

    let mut rows = stmt.query(params![employee_id, date])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

/// CacheInvalidator backed by the `day_cache` table.
/// Owns its own connection so it can be injected independently of the
/// command's main pool.
pub struct SqliteDayCache {
    conn: Connection,
}

impl SqliteDayCache {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }
}

impl CacheInvalidator for SqliteDayCache {
    fn invalidate_day(&self, employee_id: &str, date: &str) {
        // Invalidation is best-effort: a stale cached view is annoying,
        // not fatal, and must never fail a submitted clock action.
        let res = self.conn.execute(
            "DELETE FROM day_cache WHERE employee_id = ?1 AND date = ?2",
            params![employee_id, date],
        );
        if let Err(e) = res {
            messages::warning(format!("failed to invalidate cached view: {e}"));
        }
    }
}
