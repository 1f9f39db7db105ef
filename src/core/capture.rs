//! Time/location capture: turn a user request into an immutable ClockEvent.

use crate::core::notify::Notifier;
use crate::errors::{AppError, AppResult};
use crate::models::{action::ClockAction, coordinates::Coordinates, event::ClockEvent};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("acquisition timed out")]
    Timeout,

    #[error("{0}")]
    Unavailable(String),
}

/// Best-effort source of device coordinates.
/// `acquire` must return within `timeout`; callers treat any error as a
/// degradation, never as a failure of the clock action.
pub trait LocationProvider {
    fn acquire(&self, timeout: Duration) -> Result<Coordinates, LocationError>;
}

/// Coordinates pinned in the configuration (e.g. a fixed worksite).
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    fn acquire(&self, _timeout: Duration) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location source configured: acquisition always degrades.
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn acquire(&self, _timeout: Duration) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable(
            "no location source configured".to_string(),
        ))
    }
}

/// Queries an HTTP endpoint returning `{"lat": .., "lng": ..}`.
/// The request itself is bounded by the passed timeout.
pub struct HttpLocationProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpLocationProvider {
    pub fn new(endpoint: &str) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl LocationProvider for HttpLocationProvider {
    fn acquire(&self, timeout: Duration) -> Result<Coordinates, LocationError> {
        let res = self
            .client
            .get(&self.endpoint)
            .timeout(timeout)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::Unavailable(e.to_string())
                }
            })?;

        if !res.status().is_success() {
            return Err(LocationError::Unavailable(format!(
                "lookup returned HTTP {}",
                res.status().as_u16()
            )));
        }

        res.json::<Coordinates>()
            .map_err(|e| LocationError::Unavailable(e.to_string()))
    }
}

/// Produce a ClockEvent for `employee_id`.
///
/// The employee id is the only hard requirement: an empty id fails the
/// action with no side effects. Location capture, when requested, is
/// bounded by `timeout` and degrades to `location = None` with a warning.
pub fn capture_event(
    employee_id: &str,
    action: ClockAction,
    use_location: bool,
    provider: &dyn LocationProvider,
    timeout: Duration,
    notifier: &dyn Notifier,
) -> AppResult<ClockEvent> {
    let id = employee_id.trim();
    if id.is_empty() {
        return Err(AppError::MissingEmployee);
    }

    let location = if use_location {
        match provider.acquire(timeout) {
            Ok(coords) => Some(coords),
            Err(e) => {
                notifier.warning(&format!(
                    "location unavailable ({e}); recording {} without coordinates",
                    action.describe()
                ));
                None
            }
        }
    } else {
        None
    };

    Ok(ClockEvent::new(id, action, location))
}
