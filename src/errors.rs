//! Unified application error type.
//! All modules (models, core, storage, export, cli) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Local storage
    // ---------------------------
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded: {needed} bytes requested, {quota} bytes available")]
    QuotaExceeded { needed: u64, quota: u64 },

    // ---------------------------
    // Form / validation errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Row {0} does not exist")]
    InvalidRow(usize),

    #[error("Column {0} does not exist")]
    InvalidColumn(usize),

    #[error("Field is locked: {0}")]
    FieldLocked(String),

    #[error("Invalid option '{value}' for {column}")]
    InvalidChoice { column: String, value: String },

    #[error("Figure not found: {0}")]
    FigureNotFound(String),

    // ---------------------------
    // Submission
    // ---------------------------
    #[error("Submission failed: {0}")]
    Transport(String),

    #[error("Submission timed out after {0} seconds")]
    Timeout(u64),

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
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
