//! Caller-selectable policies for PK estimation and comparison.
//!
//! # Examples
//!
//! ```
//! use u_pk::config::{DegeneratePolicy, JackknifePolicy, PkConfig, RootFinder};
//!
//! let config = PkConfig::default()
//!     .with_jackknife(JackknifePolicy::Require)
//!     .with_degenerate(DegeneratePolicy::Propagate);
//! assert_eq!(config.jackknife, JackknifePolicy::Require);
//!
//! let finder = RootFinder::with_params(1e-6, 200).unwrap();
//! assert_eq!(finder.max_iterations(), 200);
//! ```

use crate::error::{PkError, Result};

/// Bisection tolerance on the recovered statistic.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Bisection iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// What to do with zero denominators and non-finite standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`PkError::DegenerateInput`].
    #[default]
    Reject,
    /// Keep going; the affected fields become NaN.
    Propagate,
}

/// What to do when the jackknife cannot be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JackknifePolicy {
    /// Log a warning and return a result without jackknife estimates.
    #[default]
    Warn,
    /// Fail with [`PkError::JackknifeInfeasible`].
    Require,
}

/// Options for [`calculate_pk_with`](crate::pk::calculate_pk_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PkConfig {
    /// Handling of arithmetic degeneracy.
    pub degenerate: DegeneratePolicy,
    /// Handling of an infeasible jackknife.
    pub jackknife: JackknifePolicy,
}

impl PkConfig {
    /// Sets the degeneracy policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Sets the jackknife policy.
    pub fn with_jackknife(mut self, policy: JackknifePolicy) -> Self {
        self.jackknife = policy;
        self
    }
}

/// Bisection parameters for inverting a quantile function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    tolerance: f64,
    max_iterations: usize,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RootFinder {
    /// Creates a root finder with a custom tolerance and iteration cap.
    ///
    /// # Errors
    ///
    /// [`PkError::InvalidConfig`] if `tolerance` is not positive and finite
    /// or `max_iterations` is zero.
    pub fn with_params(tolerance: f64, max_iterations: usize) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(PkError::invalid_config(format!(
                "tolerance must be positive and finite, got {tolerance}"
            )));
        }
        if max_iterations == 0 {
            return Err(PkError::invalid_config("max_iterations must be at least 1"));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Absolute tolerance on the recovered statistic.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maximum number of bisection steps.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

/// Options for [`compare_pks_with`](crate::compare::compare_pks_with).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompareConfig {
    /// Root finder used to turn the paired t-statistic into a p-value.
    pub root_finder: RootFinder,
}

impl CompareConfig {
    /// Sets the root finder.
    pub fn with_root_finder(mut self, root_finder: RootFinder) -> Self {
        self.root_finder = root_finder;
        self
    }
}
