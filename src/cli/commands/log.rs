use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Color per operation type, for quick scanning.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "in" => Colour::Green,
        "out" => Colour::Cyan,
        "queued" => Colour::Yellow,
        "sync" => Colour::Purple,
        "init" => Colour::Blue,
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::open(cfg)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty");
            return Ok(());
        }

        println!("📜 Internal log:\n");

        for (id, raw_date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            let op = color_for_operation(&operation).paint(format!("{operation:<7}"));
            println!("{id:>4}  {date}  {op} {target}  {message}");
        }
    }

    Ok(())
}
