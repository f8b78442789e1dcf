use std::fmt;

use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", join_fields(.0))]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures reported by the external collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("contact request failed: {0}")]
    ContactRequestFailed(String),
}

impl ServiceError {
    /// Text for the retry affordance shown next to the failure.
    pub fn retry_hint(&self) -> &'static str {
        match self {
            Self::LocationUnavailable(_) => "Check location permissions and try Near Me again.",
            Self::PaymentDeclined(_) => "Check your payment details and try again.",
            Self::ContactRequestFailed(_) => "Try sending the request again later.",
        }
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("{record}: {field} {value} is outside {min}..={max}")]
    OutOfRange {
        record: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
