//! Error taxonomy for PK estimation and comparison.
//!
//! Validation errors are raised before any matrix is built; comparison
//! errors before any comparison arithmetic. Jackknife infeasibility is only
//! an error when the caller opts into [`JackknifePolicy::Require`].
//!
//! [`JackknifePolicy::Require`]: crate::config::JackknifePolicy::Require

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PkError>;

/// Which input variable an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// The indicator (predictor), `x`.
    Indicator,
    /// The state (outcome), `y`.
    State,
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Indicator => f.write_str("x"),
            Variable::State => f.write_str("y"),
        }
    }
}

/// Every failure the crate can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PkError {
    /// A cell could not be interpreted as a number.
    #[error("{variable} contains a non-numeric value {value:?} at case {index}")]
    InvalidType {
        variable: Variable,
        index: usize,
        value: String,
    },

    /// A cell is missing (NaN, empty or NA).
    #[error("{variable} contains a missing value at case {index}")]
    MissingValue { variable: Variable, index: usize },

    /// Lengths differ or fewer than two cases were supplied.
    #[error("not enough cases: x has {x_len}, y has {y_len}; need two or more of equal length")]
    InsufficientCases { x_len: usize, y_len: usize },

    /// The state variable has fewer than two distinct values.
    #[error("y has {distinct} distinct value(s); need at least two")]
    InsufficientCategories { distinct: usize },

    /// A zero denominator or a non-finite standard error.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// Jackknife was required but a two-level state has a single-case level.
    #[error("can't do jackknife; for two-level y, need at least two cases for each level")]
    JackknifeInfeasible,

    /// Two results with different case counts (or fewer than two cases).
    #[error("case counts differ or are too small: {left} vs {right}")]
    CaseCountMismatch { left: usize, right: usize },

    /// A result passed to a comparison carries no jackknife estimates.
    #[error("result {which} has no jackknife estimates")]
    JackknifeUnavailable { which: usize },

    /// Bisection did not reach the target statistic.
    #[error("no p-value found for statistic {target} after {iterations} iterations")]
    RootNotFound { target: f64, iterations: usize },

    /// A quantile function rejected its parameters.
    #[error("distribution error: {reason}")]
    Distribution { reason: String },

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl PkError {
    /// Create a degenerate input error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create a distribution error.
    pub fn distribution(reason: impl Into<String>) -> Self {
        Self::Distribution {
            reason: reason.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the error was raised while validating raw input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidType { .. }
                | Self::MissingValue { .. }
                | Self::InsufficientCases { .. }
                | Self::InsufficientCategories { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_variable() {
        let e = PkError::MissingValue {
            variable: Variable::State,
            index: 3,
        };
        assert_eq!(e.to_string(), "y contains a missing value at case 3");
    }

    #[test]
    fn validation_kinds() {
        assert!(PkError::InsufficientCategories { distinct: 1 }.is_validation());
        assert!(!PkError::JackknifeInfeasible.is_validation());
        assert!(!PkError::degenerate("Qcdt = 0").is_validation());
    }
}
