use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Receipt {receipt} has no row {row}")]
    UnknownRow { receipt: u32, row: usize },
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
