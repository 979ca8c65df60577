use thiserror::Error;

#[derive(Debug, Error)]
pub enum KompassError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for KompassError {
    fn from(e: serde_json::Error) -> Self {
        KompassError::SerializationError(e.to_string())
    }
}
