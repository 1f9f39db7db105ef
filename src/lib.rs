//! clocksync library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! capture → submit → queue → drain pipeline as library modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::In { .. } | Commands::Out { .. } => cli::commands::clock::handle(cli, cfg),
        Commands::Sync => cli::commands::sync::handle(cli, cfg),
        Commands::Queue => cli::commands::queue::handle(cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the config once, then apply command-line overrides.
    let mut cfg = Config::load();

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(server) = &cli.server {
        cfg.server_url = server.clone();
    }

    dispatch(&cli, &cfg)
}
