use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppraisalError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Upstream {service} failure: {reason}")]
    Upstream { service: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppraisalError {
    fn from(e: serde_json::Error) -> Self {
        AppraisalError::Serialization(e.to_string())
    }
}
