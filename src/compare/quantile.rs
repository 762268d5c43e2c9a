//! p-values from quantile functions.
//!
//! The normal p-value uses the closed-form CDF. For the t-distribution only
//! a quantile function `Q(p, df)` is assumed, so the p-value is recovered by
//! bisection. The distribution is taken to be symmetric about zero, so the
//! upper-tail probability of `|t|` is the `p` with `-Q(p, df) = |t|`.
//! Searching the lower tail keeps `p` representable down to the smallest
//! positive `f64`; `1 - p` would round to 1 below about 1e-16.
//!
//! The bracket is halved arithmetically while its upper end is at least
//! 1e-3 and geometrically below that, so p-values of 1e-50
//! and smaller are reached within the default iteration cap.

use statrs::distribution::{ContinuousCDF, StudentsT};
use u_numflow::special;

use crate::config::RootFinder;
use crate::error::{PkError, Result};

/// An inverse cumulative distribution function `Q(p, df)`.
///
/// Implemented for any `Fn(f64, f64) -> f64`.
pub trait QuantileFn {
    /// Returns the statistic whose lower-tail probability is `p`.
    fn quantile(&self, p: f64, df: f64) -> Result<f64>;
}

impl<F> QuantileFn for F
where
    F: Fn(f64, f64) -> f64,
{
    fn quantile(&self, p: f64, df: f64) -> Result<f64> {
        Ok(self(p, df))
    }
}

/// Student's t quantile function.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentT;

impl QuantileFn for StudentT {
    fn quantile(&self, p: f64, df: f64) -> Result<f64> {
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| PkError::distribution(format!("t-distribution with df = {df}: {e}")))?;
        Ok(dist.inverse_cdf(p))
    }
}

/// Standard normal quantile function; `df` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormal;

impl QuantileFn for StandardNormal {
    fn quantile(&self, p: f64, _df: f64) -> Result<f64> {
        Ok(special::inverse_normal_cdf(p))
    }
}

/// Upper bracket end below which the bisection takes geometric midpoints.
const GEOMETRIC_BELOW: f64 = 1e-3;

/// Upper-tail normal p-value, `1 - Φ(|z|)`.
///
/// # Errors
///
/// [`PkError::DegenerateInput`] if `z` is NaN.
pub fn normal_p_value(z: f64) -> Result<f64> {
    if z.is_nan() {
        return Err(PkError::degenerate("z statistic is NaN"));
    }
    if z.is_infinite() {
        return Ok(0.0);
    }
    Ok(1.0 - special::standard_normal_cdf(z.abs()))
}

/// Finds the upper-tail probability `p` with `-Q(p, df) ≈ |statistic|`.
///
/// `Q` must be increasing in `p` and symmetric about zero. When the bracket
/// shrinks to adjacent floating-point values before the tolerance is met,
/// the statistic lies beyond every representable tail probability and the
/// bracket's upper end is returned.
///
/// # Errors
///
/// - [`PkError::DegenerateInput`] if `statistic` is NaN
/// - [`PkError::RootNotFound`] if the root finder runs out of iterations
/// - any error from the quantile function
///
/// # Examples
///
/// ```
/// use u_pk::compare::{normal_p_value, p_value_from_quantile, StandardNormal};
/// use u_pk::config::RootFinder;
///
/// let p = p_value_from_quantile(&StandardNormal, 1.96, 0.0, RootFinder::default()).unwrap();
/// assert!((p - normal_p_value(1.96).unwrap()).abs() < 1e-4);
/// ```
pub fn p_value_from_quantile<Q: QuantileFn + ?Sized>(
    quantile: &Q,
    statistic: f64,
    df: f64,
    finder: RootFinder,
) -> Result<f64> {
    if statistic.is_nan() {
        return Err(PkError::degenerate("statistic is NaN"));
    }
    let target = statistic.abs();
    if target.is_infinite() {
        return Ok(0.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for iteration in 1..=finder.max_iterations() {
        let mid = midpoint(lo, hi);
        if mid <= lo || mid >= hi {
            log::debug!("p below {hi:e} for |statistic| = {target:.6}; bracket exhausted");
            return Ok(hi);
        }
        let value = -quantile.quantile(mid, df)?;
        if (value - target).abs() < finder.tolerance() {
            log::debug!("p = {mid:e} for |statistic| = {target:.6} after {iteration} iterations");
            return Ok(mid);
        }
        if value > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(PkError::RootNotFound {
        target,
        iterations: finder.max_iterations(),
    })
}

/// Arithmetic midpoint for ordinary brackets, geometric once the upper end
/// drops below `GEOMETRIC_BELOW`.
fn midpoint(lo: f64, hi: f64) -> f64 {
    if hi >= GEOMETRIC_BELOW {
        (lo + hi) / 2.0
    } else {
        let lo = lo.max(f64::MIN_POSITIVE);
        ((lo.ln() + hi.ln()) / 2.0).exp()
    }
}

/// Significance band of a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    /// p > 0.05
    NotSignificant,
    /// 0.01 < p ≤ 0.05
    Significant,
    /// 0.001 < p ≤ 0.01
    HighlySignificant,
    /// p ≤ 0.001
    VeryHighlySignificant,
}

impl Significance {
    /// Classifies a p-value.
    pub fn from_p_value(p: f64) -> Self {
        if p > 0.05 {
            Self::NotSignificant
        } else if p > 0.01 {
            Self::Significant
        } else if p > 0.001 {
            Self::HighlySignificant
        } else {
            Self::VeryHighlySignificant
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotSignificant => ">0.05",
            Self::Significant => "<0.05",
            Self::HighlySignificant => "<0.01",
            Self::VeryHighlySignificant => "<0.001",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_upper_tail(t: f64, df: f64) -> f64 {
        1.0 - StudentsT::new(0.0, 1.0, df).expect("valid df").cdf(t)
    }

    #[test]
    fn normal_closed_form() {
        let p = normal_p_value(1.959964).expect("should compute");
        assert!((p - 0.025).abs() < 1e-5, "p = {p}");
        // sign does not matter
        assert!((normal_p_value(-1.959964).expect("should compute") - p).abs() < 1e-15);
        assert!((normal_p_value(0.0).expect("should compute") - 0.5).abs() < 1e-8);
        assert_eq!(normal_p_value(f64::INFINITY), Ok(0.0));
        assert!(normal_p_value(f64::NAN).is_err());
    }

    #[test]
    fn bisection_agrees_with_normal_cdf() {
        for z in [0.0, 0.5, 1.0, 1.645, 2.33, 3.0] {
            let p = p_value_from_quantile(&StandardNormal, z, 0.0, RootFinder::default())
                .expect("should converge");
            let exact = normal_p_value(z).expect("should compute");
            // the normal quantile approximation is good to 4.5e-4 in z
            assert!((p - exact).abs() < 3e-4, "z = {z}: {p} vs {exact}");
        }
    }

    #[test]
    fn bisection_agrees_with_t_cdf() {
        let df = 23.0;
        for t in [0.3, 1.0, 2.069, 2.807] {
            let p = p_value_from_quantile(&StudentT, t, df, RootFinder::default())
                .expect("should converge");
            let exact = t_upper_tail(t, df);
            assert!((p - exact).abs() < 1e-4, "t = {t}: {p} vs {exact}");
        }
    }

    #[test]
    fn t_tail_below_double_precision_of_one() {
        let mut previous = 1.0;
        for (t, df) in [(8.0, 299.0), (12.0, 23.0), (20.0, 23.0)] {
            let p = p_value_from_quantile(&StudentT, t, df, RootFinder::default())
                .expect("should converge");
            assert!(p > 0.0 && p < 1e-10, "t = {t}, df = {df}: p = {p}");
            let back = -StudentT.quantile(p, df).expect("should compute");
            assert!((back - t).abs() < 1e-4, "t = {t}: Q(p) = {back}");
            assert_eq!(Significance::from_p_value(p), Significance::VeryHighlySignificant);
            if df == 23.0 {
                assert!(p < previous);
                previous = p;
            }
        }
    }

    #[test]
    fn normal_tail_far_beyond_1e16() {
        let p = p_value_from_quantile(&StandardNormal, 15.0, 0.0, RootFinder::default())
            .expect("should converge");
        assert!(p > 0.0 && p < 1e-40, "p = {p}");
    }

    #[test]
    fn statistic_outside_quantile_range_gives_tiny_p() {
        // uniform(-1, 1) never reaches 5, so no tail probability is large enough
        let uniform = |p: f64, _df: f64| 2.0 * p - 1.0;
        let p = p_value_from_quantile(&uniform, 5.0, 0.0, RootFinder::default())
            .expect("bracket should exhaust");
        assert!(p < 1e-300, "p = {p}");
    }

    #[test]
    fn zero_statistic_is_half() {
        let p = p_value_from_quantile(&StudentT, 0.0, 10.0, RootFinder::default())
            .expect("should converge");
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn closures_are_quantile_functions() {
        // uniform(-1, 1): Q(p) = 2p - 1
        let uniform = |p: f64, _df: f64| 2.0 * p - 1.0;
        let p = p_value_from_quantile(&uniform, 0.5, 0.0, RootFinder::default())
            .expect("should converge");
        assert!((p - 0.25).abs() < 1e-4);
    }

    #[test]
    fn iteration_cap_is_enforced() {
        // never gets within tolerance of 5 because it jumps from 0 to 10
        let step = |p: f64, _df: f64| if p < 0.5 { 0.0 } else { 10.0 };
        let finder = RootFinder::with_params(1e-4, 20).expect("valid");
        let err = p_value_from_quantile(&step, 5.0, 0.0, finder).unwrap_err();
        assert_eq!(
            err,
            PkError::RootNotFound {
                target: 5.0,
                iterations: 20
            }
        );
    }

    #[test]
    fn bad_degrees_of_freedom() {
        let err = p_value_from_quantile(&StudentT, 1.0, -1.0, RootFinder::default()).unwrap_err();
        assert!(matches!(err, PkError::Distribution { .. }));
    }

    #[test]
    fn infinite_and_nan_statistics() {
        assert_eq!(
            p_value_from_quantile(&StudentT, f64::NEG_INFINITY, 5.0, RootFinder::default()),
            Ok(0.0)
        );
        assert!(p_value_from_quantile(&StudentT, f64::NAN, 5.0, RootFinder::default()).is_err());
    }

    #[test]
    fn significance_bands() {
        assert_eq!(Significance::from_p_value(0.2), Significance::NotSignificant);
        assert_eq!(Significance::from_p_value(0.05), Significance::Significant);
        assert_eq!(Significance::from_p_value(0.02), Significance::Significant);
        assert_eq!(Significance::from_p_value(0.005), Significance::HighlySignificant);
        assert_eq!(Significance::from_p_value(0.001), Significance::VeryHighlySignificant);
        assert_eq!(Significance::VeryHighlySignificant.to_string(), "<0.001");
    }
}
