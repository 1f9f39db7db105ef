use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::queued::QueuedEvent;
use crate::ui::messages;
use crate::utils::table::{Column, Table};

/// Handle `queue`: show pending and dead-lettered events.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(cfg)?;

    let pending = store::load_pending(&mut pool)?;
    let dead = store::load_dead(&mut pool)?;

    if pending.is_empty() && dead.is_empty() {
        messages::info("offline queue is empty");
        return Ok(());
    }

    if !pending.is_empty() {
        println!("📤 Pending events:\n");
        print!("{}", render_queue(&pending));
    }

    if !dead.is_empty() {
        println!("\n🪦 Dead-lettered events (exceeded max_retries):\n");
        print!("{}", render_queue(&dead));
    }

    Ok(())
}

fn render_queue(events: &[QueuedEvent]) -> String {
    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 12),
        Column::new("ACTION", 10),
        Column::new("TIMESTAMP", 27),
        Column::new("RETRIES", 7),
    ]);

    for q in events {
        table.add_row(vec![
            q.event.employee_id.clone(),
            q.event.action.describe().to_string(),
            q.event.timestamp.clone(),
            q.retry_count.to_string(),
        ]);
    }

    table.render()
}
