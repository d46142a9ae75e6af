use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialFinanceError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Domain undefined: {context}")]
    DomainUndefined { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SocialFinanceError {
    fn from(e: serde_json::Error) -> Self {
        SocialFinanceError::SerializationError(e.to_string())
    }
}
