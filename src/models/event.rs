use super::{action::ClockAction, coordinates::Coordinates};
use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

/// One intended attendance transition, captured client-side.
///
/// The timestamp is read exactly once at creation and never recomputed
/// downstream, so a slow submission cannot shift the recorded time.
/// The idempotency key is generated here so the attendance service can
/// deduplicate a duplicate delivery of the same event.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub employee_id: String,
    pub action: ClockAction,
    pub timestamp: String, // ISO-8601, set once at capture
    pub location: Option<Coordinates>,
    pub idempotency_key: String,
}

impl ClockEvent {
    pub fn new(employee_id: &str, action: ClockAction, location: Option<Coordinates>) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            action,
            timestamp: Local::now().to_rfc3339(),
            location,
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }

    /// Calendar day of the capture, "YYYY-MM-DD".
    /// Used as the cache-invalidation key for attendance views.
    pub fn date_str(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.timestamp.chars().take(10).collect())
    }

    /// "HH:MM" of the capture, for display.
    pub fn time_str(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|_| self.timestamp.chars().skip(11).take(5).collect())
    }
}
