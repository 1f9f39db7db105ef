//! Unified application error type.
//! All modules (db, core, api, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // HTTP client
    // ---------------------------
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("No employee selected: pass --employee or set employee_id in the configuration")]
    MissingEmployee,

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid clock action: {0}")]
    InvalidAction(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
