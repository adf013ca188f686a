//! Error types for scenario evaluation, loading and reporting

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Errors raised while validating, projecting or persisting scenarios
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// An assumption is non-finite, zero where a divisor is required, or out of range
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A derived quantity used as a denominator came out as zero
    #[error("division by zero: {quantity} is zero")]
    DivisionByZero { quantity: &'static str },

    /// No exit-year row exists because the hold period runs past the projection horizon
    #[error("hold period of {hold_period} years exceeds the {horizon}-year projection horizon")]
    HoldPeriodBeyondHorizon { hold_period: u32, horizon: u32 },

    /// Saved scenarios need a non-blank name
    #[error("scenario name must not be blank")]
    EmptyScenarioName,

    /// Lookup in the scenario library failed
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScenarioError {
    /// Shorthand for an [`ScenarioError::InvalidInput`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ScenarioError::invalid("exit_cap_rate", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid input for exit_cap_rate: must be greater than zero"
        );

        let err = ScenarioError::HoldPeriodBeyondHorizon { hold_period: 10, horizon: 7 };
        assert!(err.to_string().contains("10 years"));
    }
}
