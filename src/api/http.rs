use super::{AttendanceApi, ClockPayload, SubmitError};
use crate::errors::AppResult;
use crate::models::event::ClockEvent;
use std::time::Duration;

/// Real client for the attendance service.
pub struct HttpAttendanceApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpAttendanceApi {
    /// `timeout` bounds the whole submission request; without it a hung
    /// server would stall the clock action indefinitely.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl AttendanceApi for HttpAttendanceApi {
    fn submit_clock(&self, event: &ClockEvent) -> Result<(), SubmitError> {
        let url = format!("{}/attendance/clock", self.base_url);

        let res = self
            .client
            .post(&url)
            .json(&ClockPayload::from(event))
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            // Body is not contractually parsed on success.
            Ok(())
        } else {
            let body = res.text().unwrap_or_default();
            Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
