//! Closed-form PK and its two standard errors.
//!
//! # Algorithm
//!
//! ```text
//! dyx   = (Qc - Qd) / Qcdt          PK = (dyx + 1) / 2
//! Term1 = Qcc - 2·Qcd + Qdd
//! Term2 = -2·dyx · Σ_i (n - n_i)(Qc_i - Qd_i)
//! Term3 = dyx² · Σ_i n_i (n - n_i)²
//! SE1   = √(Term1 + Term2 + Term3) / Qcdt
//! SE0   = √(Term1 - (Qc - Qd)² / n) / Qcdt
//! ```
//!
//! `SE1` is the general asymptotic standard error of Somers' d; `SE0` is
//! its value under the null hypothesis of no association.
//!
//! # References
//!
//! Smith, Dutton & Smith (1996). "Measuring the performance of anesthetic
//! depth indicators". Anesthesiology, 84(1), 38–51.

use super::concordance::Concordance;
use crate::config::DegeneratePolicy;
use crate::error::{PkError, Result};

/// Radicands this far below zero (relative to `Qcdt²`) are rounding noise.
const RADICAND_SLACK: f64 = 1e-9;

/// PK and its standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PkEstimate {
    /// `Qcdt = Qc + Qd + Qtx`.
    pub qcdt: u64,
    /// Somers' `d(y|x)`.
    pub dyx: f64,
    /// `PK = (dyx + 1) / 2`, in [0, 1].
    pub pk: f64,
    /// `Qcc - 2·Qcd + Qdd`.
    pub term1: f64,
    /// Linear correction term of `SE1`.
    pub term2: f64,
    /// Quadratic correction term of `SE1`.
    pub term3: f64,
    /// Standard error under H₀ (no association).
    pub se0: f64,
    /// General standard error.
    pub se1: f64,
}

/// Derives PK, SE0 and SE1 from the aggregated counts.
///
/// # Errors
///
/// With [`DegeneratePolicy::Reject`], [`PkError::DegenerateInput`] if
/// `Qcdt = 0`, `n = 0`, or either standard error is not finite. With
/// [`DegeneratePolicy::Propagate`] those fields are NaN instead.
pub fn estimate_pk(conc: &Concordance, policy: DegeneratePolicy) -> Result<PkEstimate> {
    if policy == DegeneratePolicy::Reject {
        if conc.qcdt() == 0 {
            return Err(PkError::degenerate("no comparable pairs (Qcdt = 0)"));
        }
        if conc.n == 0 {
            return Err(PkError::degenerate("no cases (n = 0)"));
        }
    }

    let n = conc.n as f64;
    let qcdt = conc.qcdt() as f64;
    let diff = conc.qc as f64 - conc.qd as f64;

    let dyx = diff / qcdt;
    let pk = (dyx + 1.0) / 2.0;

    let term1 = conc.qcc as f64 - 2.0 * conc.qcd as f64 + conc.qdd as f64;
    let (mut linear, mut quadratic) = (0.0, 0.0);
    for row in &conc.row_totals {
        let ni = row.n as f64;
        linear += (n - ni) * (row.concordant as f64 - row.discordant as f64);
        quadratic += ni * (n - ni) * (n - ni);
    }
    let term2 = -2.0 * dyx * linear;
    let term3 = dyx * dyx * quadratic;

    let scale = qcdt * qcdt;
    let se1 = clamped_sqrt(term1 + term2 + term3, scale) / qcdt;
    let se0 = clamped_sqrt(term1 - diff * diff / n, scale) / qcdt;

    if policy == DegeneratePolicy::Reject && !(se0.is_finite() && se1.is_finite()) {
        return Err(PkError::degenerate(format!(
            "standard error is not finite (SE0 = {se0}, SE1 = {se1})"
        )));
    }

    log::debug!("PK = {pk:.6}, SE0 = {se0:.6}, SE1 = {se1:.6} (Qcdt = {})", conc.qcdt());

    Ok(PkEstimate {
        qcdt: conc.qcdt(),
        dyx,
        pk,
        term1,
        term2,
        term3,
        se0,
        se1,
    })
}

/// Square root that treats tiny negative radicands as zero.
pub(crate) fn clamped_sqrt(v: f64, scale: f64) -> f64 {
    if v < 0.0 && v >= -RADICAND_SLACK * scale.max(1.0) {
        0.0
    } else {
        v.sqrt()
    }
}
