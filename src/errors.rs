use thiserror::Error;

use crate::types::{BaseIndex, MAX_PERIODS};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("reference rate not available: {index:?}")]
    MissingReferenceRate {
        index: BaseIndex,
    },

    #[error("invalid base index: {message}")]
    InvalidBaseIndex {
        message: String,
    },

    #[error("unknown rate type: {kind}")]
    UnknownRateType {
        kind: String,
    },

    #[error("invalid period count: {periods}, expected between 1 and {max}", max = MAX_PERIODS)]
    InvalidPeriodCount {
        periods: i64,
    },

    #[error("invalid numeric input for {field}: {value:?}")]
    InvalidNumericInput {
        field: String,
        value: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation overflowed: {operation}")]
    CalculationOverflow {
        operation: String,
    },

    #[error("invalid reference data: {message}")]
    ReferenceDataError {
        message: String,
    },
}

impl CalculatorError {
    /// shorthand for a field that failed to parse or is out of range
    pub fn invalid_input(field: &str, value: impl ToString) -> Self {
        CalculatorError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// shorthand for a decimal operation that left the representable range
    pub fn overflow(operation: &str) -> Self {
        CalculatorError::CalculationOverflow {
            operation: operation.to_string(),
        }
    }
}

/// a plan or projection must cover between 1 and `MAX_PERIODS` periods
pub fn check_periods(periods: u32) -> Result<()> {
    if periods == 0 || periods > MAX_PERIODS {
        return Err(CalculatorError::InvalidPeriodCount {
            periods: i64::from(periods),
        });
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
