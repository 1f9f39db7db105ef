//! Clock action controller: capture → submit → enqueue-on-failure,
//! with an opportunistic drain of previously queued events.

use crate::api::AttendanceApi;
use crate::core::capture::{LocationProvider, capture_event};
use crate::core::notify::Notifier;
use crate::core::queue::{DrainReport, OfflineQueue};
use crate::errors::AppResult;
use crate::models::{action::ClockAction, event::ClockEvent};
use std::time::Duration;

/// Invalidation of locally cached attendance views.
/// Injected explicitly instead of reaching for ambient global state.
pub trait CacheInvalidator {
    /// Drop any cached view for (employee, "YYYY-MM-DD").
    fn invalidate_day(&self, employee_id: &str, date: &str);
}

/// For callers with nothing cached.
pub struct NoopCache;

impl CacheInvalidator for NoopCache {
    fn invalidate_day(&self, _employee_id: &str, _date: &str) {}
}

/// Terminal state of one user-initiated clock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOutcome {
    /// The event reached the attendance service.
    Submitted,
    /// Submission failed; the event is held in the offline queue.
    QueuedOffline,
}

/// Everything a caller needs to persist the effects of one action.
#[derive(Debug)]
pub struct ClockReport {
    pub outcome: ClockOutcome,
    /// The captured event (a copy; on `QueuedOffline` the original now
    /// lives in the queue).
    pub event: ClockEvent,
    /// Result of the opportunistic drain, when one ran.
    pub drain: Option<DrainReport>,
}

pub struct ClockController<'a> {
    api: &'a dyn AttendanceApi,
    cache: &'a dyn CacheInvalidator,
    notifier: &'a dyn Notifier,
    location: &'a dyn LocationProvider,
    location_timeout: Duration,
    queue: OfflineQueue,
}

impl<'a> ClockController<'a> {
    pub fn new(
        api: &'a dyn AttendanceApi,
        cache: &'a dyn CacheInvalidator,
        notifier: &'a dyn Notifier,
        location: &'a dyn LocationProvider,
        location_timeout: Duration,
        queue: OfflineQueue,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            location,
            location_timeout,
            queue,
        }
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    /// Run one clock action end to end.
    ///
    /// Validation failures (missing employee) abort the action with no
    /// side effects. Submission failures are absorbed: the event is
    /// queued, the user is told it will sync later, and the call still
    /// returns `Ok`.
    pub fn clock(
        &mut self,
        employee_id: &str,
        action: ClockAction,
        use_location: bool,
    ) -> AppResult<ClockReport> {
        let event = capture_event(
            employee_id,
            action,
            use_location,
            self.location,
            self.location_timeout,
            self.notifier,
        )?;

        let outcome = match self.api.submit_clock(&event) {
            Ok(()) => {
                self.cache.invalidate_day(&event.employee_id, &event.date_str());
                self.notifier.success(&format!(
                    "{} recorded for employee {} at {}",
                    event.action.describe(),
                    event.employee_id,
                    event.time_str()
                ));
                ClockOutcome::Submitted
            }
            Err(err) => {
                self.notifier.info(&format!(
                    "attendance service unreachable ({err}); {} saved locally and will sync later",
                    event.action.describe()
                ));
                self.queue.enqueue(event.clone());
                ClockOutcome::QueuedOffline
            }
        };

        // Opportunistic drain of previously queued events. Skipped when
        // this action itself just failed: the service is unreachable and
        // the fresh entry must keep retry_count = 0.
        let drain = if outcome == ClockOutcome::Submitted && !self.queue.is_empty() {
            Some(self.drain())
        } else {
            None
        };

        Ok(ClockReport {
            outcome,
            event,
            drain,
        })
    }

    /// Explicit drain pass over the offline queue.
    pub fn drain(&mut self) -> DrainReport {
        let report = self.queue.drain(self.api, self.notifier);
        for event in &report.recovered {
            self.cache.invalidate_day(&event.employee_id, &event.date_str());
        }
        report
    }
}
