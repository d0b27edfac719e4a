use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("invalid configuration: {message}")]
    Config {
        message: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoanError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::Config {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

/// non-fatal conditions reported alongside a successful calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationWarning {
    /// deductions left nothing to amortize; the loan is paid off upfront
    DegenerateLoan {
        computed_principal: Money,
    },
}

impl std::fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationWarning::DegenerateLoan { computed_principal } => write!(
                f,
                "nothing left to amortize after deductions (computed principal {})",
                computed_principal
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = LoanError::invalid("tenure_years", "must be at least 1");
        assert_eq!(err.to_string(), "invalid input: tenure_years must be at least 1");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: LoanError = parse.unwrap_err().into();
        assert!(matches!(err, LoanError::Config { .. }));
    }

    #[test]
    fn test_warning_display() {
        let warning = CalculationWarning::DegenerateLoan {
            computed_principal: Money::from_major(-500),
        };
        assert!(warning.to_string().contains("-500"));
    }
}
