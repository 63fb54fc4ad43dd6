use thiserror::Error;

#[derive(Error, Debug)]
pub enum EarningsError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid {field} amount {value}: must be a finite, non-negative number")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Invalid week window: {0}")]
    InvalidWindow(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EarningsError>;
