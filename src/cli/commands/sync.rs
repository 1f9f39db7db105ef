use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::controller::CacheInvalidator;
use crate::core::notify::CliNotifier;
use crate::core::queue::OfflineQueue;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{SqliteDayCache, record_event};
use crate::db::store;
use crate::errors::AppResult;
use crate::ui::messages;

use super::clock::build_api;

/// Handle `sync`: drain the persisted offline queue now.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(cfg)?;

    let pending = store::load_pending(&mut pool)?;
    if pending.is_empty() {
        messages::info("offline queue is empty — nothing to sync");
        return Ok(());
    }

    let api = build_api(cli, cfg)?;
    let cache = SqliteDayCache::open(&cfg.database)?;
    let notifier = CliNotifier;

    let mut queue = OfflineQueue::new(cfg.retry_warn_threshold, cfg.max_retries);
    for q in pending {
        queue.restore(q);
    }

    let report = queue.drain(api.as_ref(), &notifier);

    for ev in &report.recovered {
        record_event(&pool.conn, ev)?;
        cache.invalidate_day(&ev.employee_id, &ev.date_str());
    }
    for q in &report.dead {
        store::park_dead(&pool.conn, q)?;
    }
    store::replace_pending(&mut pool, queue.events())?;

    if report.still_pending == 0 && report.dead.is_empty() {
        messages::success(format!(
            "all {} queued event(s) synced",
            report.recovered.len()
        ));
    } else {
        messages::warning(format!(
            "{} of {} queued event(s) still pending",
            report.still_pending, report.attempted
        ));
    }

    oplog(
        &pool.conn,
        "sync",
        "offline queue",
        &format!(
            "drain attempted {}, recovered {}, dead-lettered {}, still pending {}",
            report.attempted,
            report.recovered.len(),
            report.dead.len(),
            report.still_pending
        ),
    )?;

    Ok(())
}
