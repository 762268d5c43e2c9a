//! The PK pipeline and its result record.

use super::concordance::{count_concordance, Concordance};
use super::contingency::{build_contingency, Contingency, CountMatrix};
use super::encode::{encode, Categories};
use super::estimate::{estimate_pk, PkEstimate};
use super::jackknife::{jackknife, Jackknife};
use super::validate::validate_cases;
use crate::config::{JackknifePolicy, PkConfig};
use crate::error::{PkError, Result};

/// Everything computed by one [`calculate_pk`] call.
///
/// Each field is the output of one pipeline stage; later stages only read
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PkResult {
    /// Number of cases.
    pub n_case: usize,
    /// Row/column categories of each case.
    pub categories: Categories,
    /// Occurrence matrix `A` and cumulative matrix `S`.
    pub contingency: Contingency,
    /// `C`, `D`, `T` and their aggregates.
    pub concordance: Concordance,
    /// PK, SE0, SE1.
    pub estimate: PkEstimate,
    /// Jackknife estimates; `None` when the jackknife was infeasible.
    pub jackknife: Option<Jackknife>,
}

impl PkResult {
    /// Number of state categories.
    pub fn rows(&self) -> usize {
        self.categories.rows
    }

    /// Number of indicator categories.
    pub fn cols(&self) -> usize {
        self.categories.cols
    }

    /// Occurrence matrix `A`.
    pub fn a(&self) -> &CountMatrix {
        &self.contingency.a
    }

    /// Row-wise cumulative matrix `S`.
    pub fn s(&self) -> &CountMatrix {
        &self.contingency.s
    }

    /// The PK effect size.
    pub fn pk(&self) -> f64 {
        self.estimate.pk
    }

    /// Standard error under H₀.
    pub fn se0(&self) -> f64 {
        self.estimate.se0
    }

    /// General standard error.
    pub fn se1(&self) -> f64 {
        self.estimate.se1
    }

    /// Whether jackknife estimates are available.
    pub fn jack_ok(&self) -> bool {
        self.jackknife.is_some()
    }

    /// Bias-corrected PK.
    pub fn pkj(&self) -> Option<f64> {
        self.jackknife.as_ref().map(|j| j.pkj)
    }

    /// Jackknife standard error.
    pub fn sej(&self) -> Option<f64> {
        self.jackknife.as_ref().map(|j| j.sej)
    }

    /// Leave-one-out PK per case.
    pub fn pkm(&self) -> Option<&[f64]> {
        self.jackknife.as_ref().map(|j| j.pkm.as_slice())
    }
}

/// Computes PK for an indicator `x` against a state `y` with default options.
///
/// # Errors
///
/// See [`calculate_pk_with`].
///
/// # Examples
///
/// ```
/// use u_pk::pk::calculate_pk;
///
/// let r = calculate_pk(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert!((r.pk() - 1.0).abs() < 1e-12);
/// assert!(r.jack_ok());
///
/// // one state level has a single case: PK is still reported
/// let r = calculate_pk(&[0.0; 6], &[1.0, 1.0, 1.0, 1.0, 1.0, 2.0]).unwrap();
/// assert!((r.pk() - 0.5).abs() < 1e-12);
/// assert!(r.pkj().is_none());
/// ```
pub fn calculate_pk(x: &[f64], y: &[f64]) -> Result<PkResult> {
    calculate_pk_with(x, y, PkConfig::default())
}

/// Computes PK for an indicator `x` against a state `y`.
///
/// # Errors
///
/// - validation errors from [`validate_cases`]
/// - [`PkError::DegenerateInput`] under [`DegeneratePolicy::Reject`]
/// - [`PkError::JackknifeInfeasible`] under [`JackknifePolicy::Require`]
///
/// [`DegeneratePolicy::Reject`]: crate::config::DegeneratePolicy::Reject
pub fn calculate_pk_with(x: &[f64], y: &[f64], config: PkConfig) -> Result<PkResult> {
    let n_case = validate_cases(x, y)?;

    let categories = encode(x, y);
    log::debug!(
        "{n_case} cases, {} distinct y-values, {} distinct x-values",
        categories.rows,
        categories.cols
    );

    let contingency = build_contingency(&categories);
    let concordance = count_concordance(&contingency);
    let estimate = estimate_pk(&concordance, config.degenerate)?;

    let jackknife = if categories.jackknife_ok {
        Some(jackknife(
            &categories,
            &concordance,
            estimate.pk,
            config.degenerate,
        )?)
    } else {
        match config.jackknife {
            JackknifePolicy::Require => return Err(PkError::JackknifeInfeasible),
            JackknifePolicy::Warn => {
                log::warn!(
                    "can't do jackknife; for two-level y, need at least two cases for each level"
                );
                None
            }
        }
    };

    Ok(PkResult {
        n_case,
        categories,
        contingency,
        concordance,
        estimate,
        jackknife,
    })
}
