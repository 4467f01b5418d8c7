use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Division by zero: {context}")]
    DivisionByZero { context: &'static str },

    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid record field '{field}': {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    #[error("Invalid config '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
