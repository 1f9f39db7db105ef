//! Client-side timeout bounds, exercised against a server that accepts
//! connections but never answers: location acquisition must degrade and
//! submission must fail as a network error, both within their bounds.

mod common;

use clocksync::api::http::HttpAttendanceApi;
use clocksync::api::{AttendanceApi, SubmitError};
use clocksync::core::capture::{HttpLocationProvider, LocationError, LocationProvider, capture_event};
use clocksync::core::notify::Notifier;
use clocksync::models::{action::ClockAction, event::ClockEvent};
use std::cell::RefCell;
use std::time::{Duration, Instant};

#[derive(Default)]
struct RecordingNotifier {
    warnings: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn info(&self, _msg: &str) {}
    fn success(&self, _msg: &str) {}
    fn warning(&self, msg: &str) {
        self.warnings.borrow_mut().push(msg.to_string());
    }
}

#[test]
fn location_acquisition_times_out_against_a_stalled_endpoint() {
    let (url, server) = common::spawn_stalling_server();
    let provider = HttpLocationProvider::new(&url).expect("build provider");

    let started = Instant::now();
    let res = provider.acquire(Duration::from_millis(300));
    let elapsed = started.elapsed();

    assert!(matches!(res, Err(LocationError::Timeout)));
    assert!(
        elapsed < Duration::from_secs(5),
        "acquire must honor its bound, took {elapsed:?}"
    );

    // Closing the client unblocks the server-side read.
    drop(provider);
    server.join().expect("stalling server thread");
}

#[test]
fn clock_action_completes_without_coordinates_when_location_stalls() {
    let (url, server) = common::spawn_stalling_server();
    let provider = HttpLocationProvider::new(&url).expect("build provider");
    let notifier = RecordingNotifier::default();

    let event = capture_event(
        "42",
        ClockAction::ClockIn,
        true,
        &provider,
        Duration::from_millis(300),
        &notifier,
    )
    .expect("a stalled location source degrades the event, never fails it");

    assert!(event.location.is_none());
    let warnings = notifier.warnings.borrow();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("location unavailable"));

    drop(provider);
    server.join().expect("stalling server thread");
}

#[test]
fn submission_fails_as_network_error_when_the_server_stalls() {
    let (url, server) = common::spawn_stalling_server();
    let api = HttpAttendanceApi::new(&url, Duration::from_millis(300)).expect("build api");
    let event = ClockEvent::new("42", ClockAction::ClockIn, None);

    let started = Instant::now();
    let res = api.submit_clock(&event);
    let elapsed = started.elapsed();

    assert!(matches!(res, Err(SubmitError::Network(_))));
    assert!(
        elapsed < Duration::from_secs(5),
        "submission must honor its bound, took {elapsed:?}"
    );

    drop(api);
    server.join().expect("stalling server thread");
}
