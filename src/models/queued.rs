use super::event::ClockEvent;
use chrono::Local;

/// A ClockEvent that failed remote submission, plus retry bookkeeping.
/// The event is embedded by value: once queued it is owned by the queue
/// and nothing else mutates it.
#[derive(Debug, Clone)]
pub struct QueuedEvent {
    pub event: ClockEvent,
    /// Failed resubmission attempts so far. Monotonically non-decreasing
    /// while the event stays queued.
    pub retry_count: u32,
    /// When the event first entered the queue (RFC 3339, local offset).
    /// Fixed at enqueue time and carried unchanged across sync passes.
    pub queued_at: String,
}

impl QueuedEvent {
    pub fn new(event: ClockEvent) -> Self {
        Self {
            event,
            retry_count: 0,
            queued_at: Local::now().to_rfc3339(),
        }
    }

    /// Rebuild a queue entry from persisted state, preserving the
    /// retry counter and enqueue timestamp accumulated by earlier passes.
    pub fn restored(event: ClockEvent, retry_count: u32, queued_at: String) -> Self {
        Self {
            event,
            retry_count,
            queued_at,
        }
    }
}
