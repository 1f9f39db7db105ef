//! Outbox persistence: `pending_events` rows must survive mirror passes
//! with their bookkeeping intact.

mod common;

use clocksync::db::initialize::init_db;
use clocksync::db::pool::DbPool;
use clocksync::db::store::{load_pending, replace_pending};
use clocksync::models::{action::ClockAction, event::ClockEvent, queued::QueuedEvent};

fn open_pool(name: &str) -> DbPool {
    let path = common::setup_test_db(name);
    let pool = DbPool::new(&path).expect("open test db");
    init_db(&pool.conn).expect("create schema");
    pool
}

#[test]
fn pending_round_trip_preserves_retry_counts_and_order() {
    let mut pool = open_pool("store_round_trip");

    let first = QueuedEvent::restored(
        ClockEvent::new("42", ClockAction::ClockIn, None),
        2,
        "2026-08-29T08:00:00+02:00".into(),
    );
    let second = QueuedEvent::restored(
        ClockEvent::new("43", ClockAction::ClockOut, None),
        0,
        "2026-08-29T09:00:00+02:00".into(),
    );

    replace_pending(&mut pool, &[first, second]).expect("mirror queue");
    let loaded = load_pending(&mut pool).expect("load queue");

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].event.employee_id, "42");
    assert_eq!(loaded[0].retry_count, 2);
    assert_eq!(loaded[1].event.employee_id, "43");
    assert_eq!(loaded[1].retry_count, 0);
}

#[test]
fn rewrites_keep_the_original_enqueue_timestamp() {
    let mut pool = open_pool("store_queued_at");

    let queued = QueuedEvent::new(ClockEvent::new("42", ClockAction::ClockIn, None));
    let stamped = queued.queued_at.clone();

    replace_pending(&mut pool, &[queued]).expect("first mirror");

    // A failed sync pass bumps the retry counter and mirrors the queue again.
    let mut reloaded = load_pending(&mut pool).expect("reload");
    reloaded[0].retry_count += 1;
    replace_pending(&mut pool, &reloaded).expect("second mirror");

    let after = load_pending(&mut pool).expect("reload after rewrite");
    assert_eq!(after[0].retry_count, 1);
    assert_eq!(
        after[0].queued_at, stamped,
        "queued_at records when the event entered the queue, not the last rewrite"
    );
}
