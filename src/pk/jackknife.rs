//! Leave-one-out jackknife for PK.
//!
//! Removing case `k` in cell `(i, j)` removes exactly the ordered pairs it
//! takes part in, `2·C[i][j]` concordant, `2·D[i][j]` discordant and
//! `2·T[i][j]` tied, so each leave-one-out PK is an O(1) correction of the
//! global counts:
//!
//! ```text
//! PKm[k] = (Qcm + Qtxm / 2) / (Qcm + Qdm + Qtxm)
//! PKj    = n·PK - (n - 1)·mean(PKm)
//! SEj    = √((n - 1)/n · (Σ PKm² - (Σ PKm)²/n))
//! ```
//!
//! # References
//!
//! Efron & Stein (1981). "The jackknife estimate of variance".
//! The Annals of Statistics, 9(3), 586–596.

use u_numflow::stats;

use super::concordance::Concordance;
use super::encode::Categories;
use super::estimate::clamped_sqrt;
use crate::config::DegeneratePolicy;
use crate::error::{PkError, Result};

/// Jackknife re-estimation of PK.
#[derive(Debug, Clone, PartialEq)]
pub struct Jackknife {
    /// Leave-one-out PK for each case, in original case order.
    pub pkm: Vec<f64>,
    /// `SPKm = Σ PKm`.
    pub sum: f64,
    /// `SSPKm = Σ PKm²`.
    pub sum_sq: f64,
    /// Bias-corrected PK.
    pub pkj: f64,
    /// Jackknife standard error.
    pub sej: f64,
}

/// Runs the jackknife over every case.
///
/// Feasibility is the caller's concern (see [`Categories::jackknife_ok`]);
/// this only guards against a leave-one-out sample with no comparable pairs.
///
/// # Errors
///
/// With [`DegeneratePolicy::Reject`], [`PkError::DegenerateInput`] if
/// removing some case leaves no comparable pairs.
pub fn jackknife(
    categories: &Categories,
    conc: &Concordance,
    pk: f64,
    policy: DegeneratePolicy,
) -> Result<Jackknife> {
    let n = categories.state.len();
    let (qc, qd, qtx) = (conc.qc as f64, conc.qd as f64, conc.qtx as f64);

    let mut pkm = Vec::with_capacity(n);
    for (k, (&i, &j)) in categories
        .state
        .iter()
        .zip(&categories.indicator)
        .enumerate()
    {
        let qcm = qc - 2.0 * conc.c.get(i, j) as f64;
        let qdm = qd - 2.0 * conc.d.get(i, j) as f64;
        let qtxm = qtx - 2.0 * conc.t.get(i, j) as f64;
        let qcdtm = qcm + qdm + qtxm;

        if qcdtm <= 0.0 && policy == DegeneratePolicy::Reject {
            return Err(PkError::degenerate(format!(
                "no comparable pairs remain without case {k}"
            )));
        }
        pkm.push((qcm + qtxm / 2.0) / qcdtm);
    }

    let nf = n as f64;
    let sum: f64 = pkm.iter().sum();
    let sum_sq: f64 = pkm.iter().map(|v| v * v).sum();

    // NaN entries only occur under DegeneratePolicy::Propagate
    let mean = stats::mean(&pkm).unwrap_or(f64::NAN);
    let pkj = nf * pk - (nf - 1.0) * mean;
    let sej = clamped_sqrt((nf - 1.0) * (sum_sq - sum * sum / nf) / nf, sum_sq);

    log::debug!("jackknife over {n} cases: PKj = {pkj:.6}, SEj = {sej:.6}");

    Ok(Jackknife {
        pkm,
        sum,
        sum_sq,
        pkj,
        sej,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pk::concordance::count_concordance;
    use crate::pk::contingency::build_contingency;
    use crate::pk::encode::encode;
    use crate::pk::estimate::estimate_pk;

    fn run(x: &[f64], y: &[f64]) -> (f64, Jackknife) {
        let cats = encode(x, y);
        let conc = count_concordance(&build_contingency(&cats));
        let pk = estimate_pk(&conc, DegeneratePolicy::Reject)
            .expect("should compute")
            .pk;
        let jk = jackknife(&cats, &conc, pk, DegeneratePolicy::Reject).expect("should compute");
        (pk, jk)
    }

    /// PK of the sample without case `skip`, by direct enumeration.
    fn pk_without(x: &[f64], y: &[f64], skip: usize) -> f64 {
        let (mut c, mut d, mut t) = (0.0, 0.0, 0.0);
        for k in (0..x.len()).filter(|&k| k != skip) {
            for l in (0..x.len()).filter(|&l| l != skip) {
                if y[k] == y[l] {
                    continue;
                }
                let s = (x[k] - x[l]) * (y[k] - y[l]);
                if s > 0.0 {
                    c += 1.0;
                } else if s < 0.0 {
                    d += 1.0;
                } else {
                    t += 1.0;
                }
            }
        }
        (c + t / 2.0) / (c + d + t)
    }

    #[test]
    fn leave_one_out_matches_recomputation() {
        let x = [1.0, 2.0, 2.0, 3.0, 1.0, 4.0, 3.0];
        let y = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 1.0];
        let (_, jk) = run(&x, &y);
        for (k, &v) in jk.pkm.iter().enumerate() {
            let expected = pk_without(&x, &y, k);
            assert!((v - expected).abs() < 1e-12, "case {k}: {v} vs {expected}");
        }
    }

    #[test]
    fn perfect_prediction_has_zero_spread() {
        let (pk, jk) = run(&[1.0, 1.0, 2.0, 2.0], &[1.0, 1.0, 2.0, 2.0]);
        assert!((pk - 1.0).abs() < 1e-12);
        assert!(jk.pkm.iter().all(|v| (v - 1.0).abs() < 1e-12));
        assert!((jk.pkj - 1.0).abs() < 1e-12);
        assert!(jk.sej.abs() < 1e-12);
    }

    #[test]
    fn sums_are_consistent() {
        let (_, jk) = run(&[3.0, 1.0, 2.0, 5.0, 4.0], &[1.0, 1.0, 2.0, 2.0, 3.0]);
        let sum: f64 = jk.pkm.iter().sum();
        assert!((jk.sum - sum).abs() < 1e-12);
        assert!(jk.sej >= 0.0);
    }

    /// Deterministic LCG sample with four state levels and additive noise;
    /// a longer sample extends a shorter one with the same seed.
    fn noisy_sample(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut s = seed;
        let mut next = move || {
            s = s
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            s >> 33
        };
        let (mut x, mut y) = (Vec::with_capacity(n), Vec::with_capacity(n));
        for _ in 0..n {
            let state = next() % 4;
            let noise = next() % 5;
            y.push(state as f64);
            x.push((state + noise) as f64);
        }
        (x, y)
    }

    #[test]
    fn bias_correction_shrinks_with_sample_size() {
        for seed in [1, 7, 42] {
            let mut previous = f64::INFINITY;
            for n in [25, 100, 400, 1600] {
                let (x, y) = noisy_sample(seed, n);
                let (pk, jk) = run(&x, &y);
                let bias = (jk.pkj - pk).abs();
                assert!(
                    bias <= previous,
                    "seed {seed}, n = {n}: |PKj - PK| = {bias} grew from {previous}"
                );
                previous = bias;
            }
            assert!(previous < 1e-4, "seed {seed}: |PKj - PK| = {previous}");
        }
    }

    #[test]
    fn empty_leave_one_out_sample_is_degenerate() {
        // without the single level-2 case no pair is comparable
        let cats = encode(&[0.0, 1.0, 2.0], &[1.0, 1.0, 2.0]);
        let conc = count_concordance(&build_contingency(&cats));
        let err = jackknife(&cats, &conc, 0.5, DegeneratePolicy::Reject).unwrap_err();
        assert!(matches!(err, PkError::DegenerateInput { .. }));

        let jk = jackknife(&cats, &conc, 0.5, DegeneratePolicy::Propagate).expect("should run");
        assert!(jk.pkm[2].is_nan());
    }
}
