//! Error types shared by table loading and the projection engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PensionError {
    /// A lookup table has no usable entry for the requested key
    #[error("Missing table entry: {table} has no value for {key}")]
    MissingTableEntry { table: &'static str, key: String },

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Malformed table row in {file} at line {line}: {reason}")]
    TableParse {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PensionError {
    pub fn missing(table: &'static str, key: impl ToString) -> Self {
        PensionError::MissingTableEntry {
            table,
            key: key.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PensionError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PensionError>;
