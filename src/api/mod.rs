//! Remote submission client: one trait, two interchangeable
//! implementations (HTTP and mock), one wire payload.

pub mod http;
pub mod mock;

use crate::models::{action::ClockAction, coordinates::Coordinates, event::ClockEvent};
use serde::Serialize;
use thiserror::Error;

/// Structured failure of a single submission attempt.
/// These are never fatal to a clock action: the caller absorbs them
/// into the offline queue.
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Boundary to the external attendance service.
/// Exactly one network call per invocation; 2xx is success, everything
/// else is a structured failure.
pub trait AttendanceApi {
    fn submit_clock(&self, event: &ClockEvent) -> Result<(), SubmitError>;
}

/// JSON body of `POST /attendance/clock`.
/// `location` serializes as `null` when absent (the service expects the
/// field to always be present).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockPayload<'a> {
    pub employee_id: &'a str,
    pub action: ClockAction,
    pub timestamp: &'a str,
    pub location: Option<Coordinates>,
    pub idempotency_key: &'a str,
}

impl<'a> From<&'a ClockEvent> for ClockPayload<'a> {
    fn from(ev: &'a ClockEvent) -> Self {
        Self {
            employee_id: &ev.employee_id,
            action: ev.action,
            timestamp: &ev.timestamp,
            location: ev.location,
            idempotency_key: &ev.idempotency_key,
        }
    }
}
