use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxEngineError {
    #[error("Invalid date ordering: {field} — {reason}")]
    InvalidDateOrdering { field: String, reason: String },

    #[error("Invalid horizon length: {field} has {actual} entries, expected {expected}")]
    InvalidHorizonLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid rate: {field} = {rate} — {reason}")]
    InvalidRate {
        field: String,
        rate: Decimal,
        reason: String,
    },

    #[error("Negative input: {field} = {value}")]
    NegativeInput { field: String, value: Decimal },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl TaxEngineError {
    /// Name of the input field that violated a constraint.
    pub fn field(&self) -> Option<&str> {
        match self {
            TaxEngineError::InvalidDateOrdering { field, .. }
            | TaxEngineError::InvalidHorizonLength { field, .. }
            | TaxEngineError::InvalidRate { field, .. }
            | TaxEngineError::NegativeInput { field, .. }
            | TaxEngineError::InvalidInput { field, .. } => Some(field),
            TaxEngineError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for TaxEngineError {
    fn from(e: serde_json::Error) -> Self {
        TaxEngineError::SerializationError(e.to_string())
    }
}
