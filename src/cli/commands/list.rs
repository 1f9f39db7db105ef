use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{cache_day_view, load_day_view, load_events_by_date};
use crate::errors::{AppError, AppResult};
use crate::models::event::ClockEvent;
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Handle `list`: show locally recorded events for one day.
///
/// With --employee the rendered view is cached in `day_cache` and reused
/// until a later submission for that (employee, day) invalidates it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date: date_arg,
        employee,
    } = cmd
    {
        let day = match date_arg {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };
        let day_str = day.format("%Y-%m-%d").to_string();

        let pool = DbPool::open(cfg)?;

        if let Some(emp) = employee {
            if let Some(cached) = load_day_view(&pool.conn, emp, &day_str)? {
                print!("{cached}");
                return Ok(());
            }
        }

        let events = load_events_by_date(&pool.conn, &day, employee.as_deref())?;

        if events.is_empty() {
            println!("No events for {day_str}");
            return Ok(());
        }

        let view = render_day(&day_str, &events);
        print!("{view}");

        if let Some(emp) = employee {
            cache_day_view(&pool.conn, emp, &day_str, &view)?;
        }
    }
    Ok(())
}

fn render_day(day: &str, events: &[(ClockEvent, String)]) -> String {
    let mut out = format!("🗓  Events for {day}:\n\n");

    let mut table = Table::new(vec![
        Column::new("EMPLOYEE", 12),
        Column::new("ACTION", 10),
        Column::new("TIME", 5),
        Column::new("LOCATION", 22),
        Column::new("SYNCED AT", 27),
    ]);

    for (ev, synced_at) in events {
        let loc = match ev.location {
            Some(c) => format!("{:.5},{:.5}", c.lat, c.lng),
            None => "-".to_string(),
        };
        table.add_row(vec![
            ev.employee_id.clone(),
            ev.action.describe().to_string(),
            ev.time_str(),
            loc,
            synced_at.clone(),
        ]);
    }

    out.push_str(&table.render());
    out
}
