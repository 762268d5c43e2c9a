//! Comparing the PK of two indicators.
//!
//! Given two [`PkResult`](crate::pk::PkResult)s computed on the same cases,
//! [`compare_pks`] runs a group z-test on the jackknife estimates and a
//! paired t-test on the leave-one-out differences.
//!
//! # Modules
//!
//! - [`compare_pks`] — group and paired statistics with p-values
//! - [`p_value_from_quantile`] — bisection over a [`QuantileFn`]
//! - [`Significance`] — p-value bands (>0.05, <0.05, <0.01, <0.001)

mod comparison;
mod quantile;

pub use comparison::{compare_pks, compare_pks_with, PkComparison};
pub use quantile::{
    normal_p_value, p_value_from_quantile, QuantileFn, Significance, StandardNormal, StudentT,
};
