use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomesteadError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HomesteadError {
    fn from(e: serde_json::Error) -> Self {
        HomesteadError::SerializationError(e.to_string())
    }
}
