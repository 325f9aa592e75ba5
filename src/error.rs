use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    /// Input row or file does not have the shape the explainer needs.
    #[error("Malformed input at '{key}': {reason}")]
    MalformedInput { key: String, reason: String },

    /// A conversion was asked for a value it has no finite answer for.
    #[error("Domain edge case in {operation} (value = {value}): {reason}")]
    DomainEdgeCase {
        operation: &'static str,
        value: f64,
        reason: String,
    },

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl ExplainError {
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn domain(operation: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::DomainEdgeCase {
            operation,
            value,
            reason: reason.into(),
        }
    }
}

pub type ExplainResult<T> = Result<T, ExplainError>;
