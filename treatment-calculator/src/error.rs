use thiserror::Error;

/// Errors raised by the treatment cost calculator.
///
/// Validation runs before any allocation step, so a calculation either
/// produces a complete result or fails with one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalculatorError {
    /// Create an invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Human-readable reason, without the error prefix
    pub fn reason(&self) -> &str {
        match self {
            CalculatorError::InvalidInput(reason) => reason,
        }
    }
}

pub type CalculatorResult<T> = Result<T, CalculatorError>;
