use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for LendingError {
    fn from(e: serde_json::Error) -> Self {
        LendingError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for LendingError {
    fn from(e: std::io::Error) -> Self {
        LendingError::Io(e.to_string())
    }
}

pub type LendingResult<T> = Result<T, LendingError>;
