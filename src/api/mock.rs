//! In-memory stand-in for the attendance service.
//! Used by the library tests and by the CLI's hidden `--test` mode.

use super::{AttendanceApi, SubmitError};
use crate::models::event::ClockEvent;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Records every submitted event and answers from an optional script of
/// per-call responses; once the script is exhausted it falls back to the
/// default outcome. Single-threaded by design, like the pipeline itself.
pub struct MockAttendanceApi {
    scripted: RefCell<VecDeque<Result<(), SubmitError>>>,
    default: Result<(), SubmitError>,
    submitted: RefCell<Vec<ClockEvent>>,
}

impl MockAttendanceApi {
    /// Every submission succeeds.
    pub fn ok() -> Self {
        Self {
            scripted: RefCell::new(VecDeque::new()),
            default: Ok(()),
            submitted: RefCell::new(Vec::new()),
        }
    }

    /// Every submission fails with a network error.
    pub fn failing(reason: &str) -> Self {
        Self {
            scripted: RefCell::new(VecDeque::new()),
            default: Err(SubmitError::Network(reason.to_string())),
            submitted: RefCell::new(Vec::new()),
        }
    }

    /// Answer the first calls from `responses`, then behave like `ok()`.
    pub fn scripted(responses: Vec<Result<(), SubmitError>>) -> Self {
        Self {
            scripted: RefCell::new(responses.into()),
            default: Ok(()),
            submitted: RefCell::new(Vec::new()),
        }
    }

    /// Number of submission calls received so far.
    pub fn calls(&self) -> usize {
        self.submitted.borrow().len()
    }

    /// Copies of every event submitted, in call order.
    pub fn submitted(&self) -> Vec<ClockEvent> {
        self.submitted.borrow().clone()
    }
}

impl AttendanceApi for MockAttendanceApi {
    fn submit_clock(&self, event: &ClockEvent) -> Result<(), SubmitError> {
        self.submitted.borrow_mut().push(event.clone());
        match self.scripted.borrow_mut().pop_front() {
            Some(response) => response,
            None => self.default.clone(),
        }
    }
}
