//! Offline event queue: an in-memory FIFO of clock events that failed
//! remote submission, with bounded-warning retry bookkeeping.

use crate::api::AttendanceApi;
use crate::core::notify::Notifier;
use crate::models::{event::ClockEvent, queued::QueuedEvent};

/// Outcome of one drain pass.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Events that succeeded on resubmission, in queue order.
    pub recovered: Vec<ClockEvent>,
    /// Events moved to the dead-letter side after exceeding `max_retries`.
    pub dead: Vec<QueuedEvent>,
    /// Resubmissions attempted in this pass.
    pub attempted: usize,
    /// Queue length after the pass.
    pub still_pending: usize,
}

pub struct OfflineQueue {
    events: Vec<QueuedEvent>,
    /// Advisory guard against overlapping drain passes.
    syncing: bool,
    /// Soft "having trouble syncing" point; fires once per crossing.
    warn_threshold: u32,
    /// Optional dead-letter bound. `None` retries forever.
    max_retries: Option<u32>,
}

impl OfflineQueue {
    pub fn new(warn_threshold: u32, max_retries: Option<u32>) -> Self {
        Self {
            events: Vec::new(),
            syncing: false,
            warn_threshold,
            max_retries,
        }
    }

    /// Append a freshly failed event with `retry_count = 0`.
    pub fn enqueue(&mut self, event: ClockEvent) {
        self.events.push(QueuedEvent::new(event));
    }

    /// Re-insert an entry persisted by an earlier run, keeping its
    /// accumulated retry count. Restore order defines queue order.
    pub fn restore(&mut self, queued: QueuedEvent) {
        self.events.push(queued);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[QueuedEvent] {
        &self.events
    }

    /// Attempt to resubmit every queued event, oldest first, through the
    /// same client used for fresh events.
    ///
    /// Successes are removed; failures stay queued with their retry count
    /// bumped in place. An empty queue (or an already-running pass) is a
    /// no-op: no network calls are issued.
    pub fn drain(&mut self, api: &dyn AttendanceApi, notifier: &dyn Notifier) -> DrainReport {
        let mut report = DrainReport::default();

        if self.syncing || self.events.is_empty() {
            report.still_pending = self.events.len();
            return report;
        }

        self.syncing = true;
        report.attempted = self.events.len();

        let mut remaining = Vec::new();
        for mut queued in self.events.drain(..) {
            match api.submit_clock(&queued.event) {
                Ok(()) => {
                    notifier.success(&format!(
                        "synced offline {} for employee {} ({})",
                        queued.event.action.describe(),
                        queued.event.employee_id,
                        queued.event.time_str()
                    ));
                    report.recovered.push(queued.event);
                }
                Err(err) => {
                    queued.retry_count += 1;

                    if queued.retry_count == self.warn_threshold {
                        notifier.warning(&format!(
                            "having trouble syncing a {} for employee {} ({} attempts so far): {}",
                            queued.event.action.describe(),
                            queued.event.employee_id,
                            queued.retry_count,
                            err
                        ));
                    }

                    match self.max_retries {
                        Some(max) if queued.retry_count >= max => {
                            notifier.warning(&format!(
                                "giving up on a {} for employee {} after {} attempts; parked in the dead-letter list",
                                queued.event.action.describe(),
                                queued.event.employee_id,
                                queued.retry_count
                            ));
                            report.dead.push(queued);
                        }
                        _ => remaining.push(queued),
                    }
                }
            }
        }

        self.events = remaining;
        self.syncing = false;
        report.still_pending = self.events.len();
        report
    }
}
