use crate::api::AttendanceApi;
use crate::api::http::HttpAttendanceApi;
use crate::api::mock::MockAttendanceApi;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::capture::{FixedLocation, HttpLocationProvider, LocationProvider, NoLocation};
use crate::core::controller::{ClockController, ClockOutcome};
use crate::core::notify::CliNotifier;
use crate::core::queue::OfflineQueue;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{SqliteDayCache, record_event};
use crate::db::store;
use crate::errors::AppResult;
use crate::models::action::ClockAction;
use std::time::Duration;

/// Handle `in` / `out`: run one clock action through the controller and
/// persist its effects (history row, queue rows, internal log).
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (action, employee, location, no_location) = match &cli.command {
        Commands::In {
            employee,
            location,
            no_location,
        } => (ClockAction::ClockIn, employee, *location, *no_location),
        Commands::Out {
            employee,
            location,
            no_location,
        } => (ClockAction::ClockOut, employee, *location, *no_location),
        _ => return Ok(()),
    };

    let employee = employee.clone().unwrap_or_else(|| cfg.employee_id.clone());
    let use_location = if no_location {
        false
    } else {
        location || cfg.use_location
    };

    let mut pool = DbPool::open(cfg)?;

    let api: Box<dyn AttendanceApi> = build_api(cli, cfg)?;
    let cache = SqliteDayCache::open(&cfg.database)?;
    let notifier = CliNotifier;
    let provider: Box<dyn LocationProvider> = build_location_provider(cfg)?;

    let mut queue = OfflineQueue::new(cfg.retry_warn_threshold, cfg.max_retries);
    for q in store::load_pending(&mut pool)? {
        queue.restore(q);
    }

    let mut controller = ClockController::new(
        api.as_ref(),
        &cache,
        &notifier,
        provider.as_ref(),
        Duration::from_secs(cfg.location_timeout_secs),
        queue,
    );

    let report = controller.clock(&employee, action, use_location)?;

    match report.outcome {
        ClockOutcome::Submitted => {
            record_event(&pool.conn, &report.event)?;
            oplog(
                &pool.conn,
                action.to_db_str(),
                &employee,
                &format!("{} submitted at {}", action.describe(), report.event.timestamp),
            )?;
        }
        ClockOutcome::QueuedOffline => {
            // Log the exact payload that failed to send, for later triage.
            let payload = serde_json::to_string(&crate::api::ClockPayload::from(&report.event))
                .unwrap_or_else(|_| report.event.timestamp.clone());
            oplog(&pool.conn, "queued", &employee, &payload)?;
        }
    }

    if let Some(drain) = &report.drain {
        for ev in &drain.recovered {
            record_event(&pool.conn, ev)?;
        }
        for q in &drain.dead {
            store::park_dead(&pool.conn, q)?;
        }
    }

    // Mirror whatever is still queued back to disk.
    store::replace_pending(&mut pool, controller.queue().events())?;

    Ok(())
}

pub fn build_api(cli: &Cli, cfg: &Config) -> AppResult<Box<dyn AttendanceApi>> {
    if cli.test {
        Ok(Box::new(MockAttendanceApi::ok()))
    } else {
        Ok(Box::new(HttpAttendanceApi::new(
            &cfg.server_url,
            Duration::from_secs(cfg.http_timeout_secs),
        )?))
    }
}

fn build_location_provider(cfg: &Config) -> AppResult<Box<dyn LocationProvider>> {
    if let Some(endpoint) = &cfg.location_endpoint {
        Ok(Box::new(HttpLocationProvider::new(endpoint)?))
    } else if let Some(coords) = cfg.fixed_location {
        Ok(Box::new(FixedLocation(coords)))
    } else {
        Ok(Box::new(NoLocation))
    }
}
