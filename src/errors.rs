//! Unified application error type.
//! All modules (db, core, cli, export, utils) return AppError so every
//! failure reaches the CLI layer as a human-readable reason.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / formats
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Preconditions
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Folder not found or not a directory: {0}")]
    FolderNotFound(String),

    #[error("Database file not found: {0}")]
    DatabaseNotFound(String),

    #[error("Unreadable reference file {path}: {reason}")]
    ReferenceFile { path: String, reason: String },

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    // ---------------------------
    // Output
    // ---------------------------
    #[error("Write failed for {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("No sequence number left after {0}")]
    SequenceExhausted(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
