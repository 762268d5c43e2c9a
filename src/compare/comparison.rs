//! Comparing the PK of two indicators measured on the same cases.
//!
//! # Algorithm
//!
//! Group test on the jackknife estimates:
//!
//! ```text
//! PKD = PKj₁ - PKj₂     SED = √(SEj₁² + SEj₂²)     ZD = PKD / SED
//! ```
//!
//! Paired test on the per-case leave-one-out differences
//! `PKmD[k] = PKm₁[k] - PKm₂[k]`:
//!
//! ```text
//! DF   = n - 1
//! PKDJ = n·PKD - (DF/n)·Σ PKmD
//! SEDJ = √((DF/n)·(Σ PKmD² - (Σ PKmD)²/n))
//! TD   = PKDJ / SEDJ
//! ```
//!
//! `ZD` is referred to the standard normal, `TD` to Student's t with `DF`
//! degrees of freedom. Both p-values are upper-tail probabilities of the
//! absolute statistic.

use super::quantile::{normal_p_value, p_value_from_quantile, QuantileFn, Significance, StudentT};
use crate::config::CompareConfig;
use crate::error::{PkError, Result};
use crate::pk::{Jackknife, PkResult};

/// Result of comparing two PK results.
#[derive(Debug, Clone, PartialEq)]
pub struct PkComparison {
    /// Number of cases shared by both results.
    pub n_case: usize,
    /// Difference of the jackknife PK estimates.
    pub pkd: f64,
    /// Standard error of `pkd` for independent groups.
    pub sed: f64,
    /// Group z-statistic.
    pub zd: f64,
    /// Upper-tail normal p-value of `|zd|`.
    pub zp: f64,
    /// Significance band of `zp`.
    pub z_judgement: Significance,
    /// Per-case differences of the leave-one-out estimates.
    pub pkmd: Vec<f64>,
    /// `Σ PKmD`.
    pub sum_d: f64,
    /// `Σ PKmD²`.
    pub ssd: f64,
    /// Degrees of freedom, `n - 1`.
    pub df: usize,
    /// Paired jackknife difference.
    pub pkdj: f64,
    /// Standard error of `pkdj`.
    pub sedj: f64,
    /// Paired t-statistic.
    pub td: f64,
    /// Upper-tail t p-value of `|td|`.
    pub tp: f64,
    /// Significance band of `tp`.
    pub t_judgement: Significance,
}

/// Compares two PK results with Student's t quantiles and default options.
///
/// # Errors
///
/// See [`compare_pks_with`].
///
/// # Examples
///
/// ```
/// use u_pk::compare::compare_pks;
/// use u_pk::pk::calculate_pk;
///
/// let y = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 1.0, 2.0];
/// let r1 = calculate_pk(&[1.0, 2.0, 3.0, 3.0, 5.0, 6.0, 1.0, 4.0], &y).unwrap();
/// let r2 = calculate_pk(&[2.0, 1.0, 1.0, 3.0, 2.0, 3.0, 3.0, 1.0], &y).unwrap();
///
/// let c = compare_pks(&r1, &r2).unwrap();
/// assert!(c.pkd > 0.0);
/// assert_eq!(c.df, 7);
///
/// let same = compare_pks(&r1, &r1).unwrap();
/// assert!(same.zd.abs() < 1e-12 && same.td.abs() < 1e-12);
/// ```
pub fn compare_pks(first: &PkResult, second: &PkResult) -> Result<PkComparison> {
    compare_pks_with(first, second, &StudentT, CompareConfig::default())
}

/// Compares two PK results computed on the same cases.
///
/// # Errors
///
/// - [`PkError::CaseCountMismatch`] if the case counts differ or are below 2
/// - [`PkError::JackknifeUnavailable`] if either result has no jackknife
/// - [`PkError::RootNotFound`] if the t p-value search does not converge
pub fn compare_pks_with<Q: QuantileFn + ?Sized>(
    first: &PkResult,
    second: &PkResult,
    quantile: &Q,
    config: CompareConfig,
) -> Result<PkComparison> {
    let n = first.n_case;
    if n != second.n_case || n < 2 {
        return Err(PkError::CaseCountMismatch {
            left: first.n_case,
            right: second.n_case,
        });
    }
    let jk1 = jackknife_of(first, 1)?;
    let jk2 = jackknife_of(second, 2)?;

    let pkd = jk1.pkj - jk2.pkj;
    let sed = (jk1.sej * jk1.sej + jk2.sej * jk2.sej).sqrt();
    let zd = ratio(pkd, sed);
    let zp = normal_p_value(zd)?;

    let pkmd: Vec<f64> = jk1.pkm.iter().zip(&jk2.pkm).map(|(a, b)| a - b).collect();
    let sum_d: f64 = pkmd.iter().sum();
    let ssd: f64 = pkmd.iter().map(|d| d * d).sum();

    let nf = n as f64;
    let df = n - 1;
    let shrink = df as f64 / nf;
    let pkdj = nf * pkd - shrink * sum_d;
    let sedj = (shrink * (ssd - sum_d * sum_d / nf)).max(0.0).sqrt();
    let td = ratio(pkdj, sedj);
    let tp = p_value_from_quantile(quantile, td, df as f64, config.root_finder)?;

    log::debug!("ZD = {zd:.4} (p = {zp:.4}), TD = {td:.4} on {df} df (p = {tp:.4})");

    Ok(PkComparison {
        n_case: n,
        pkd,
        sed,
        zd,
        zp,
        z_judgement: Significance::from_p_value(zp),
        pkmd,
        sum_d,
        ssd,
        df,
        pkdj,
        sedj,
        td,
        tp,
        t_judgement: Significance::from_p_value(tp),
    })
}

/// `num / den`, with `0 / 0` taken as 0 (identical inputs).
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 && num == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn jackknife_of(result: &PkResult, which: usize) -> Result<&Jackknife> {
    result
        .jackknife
        .as_ref()
        .ok_or(PkError::JackknifeUnavailable { which })
}
