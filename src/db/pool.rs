//! SQLite connection wrapper (lightweight for CLI usage).

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Open the configured database and make sure the schema exists.
    /// Every command handler goes through here.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = Self::new(&cfg.database)?;
        init_db(&pool.conn)?;
        Ok(pool)
    }
}
