//! PK: a rank-concordance effect size for ordinal indicators.
//!
//! PK measures how well an ordinal indicator `x` predicts an ordinal state
//! `y`. It is the probability that, for two cases with different states,
//! the indicator orders them the same way as the state, counting indicator
//! ties as one half. 0.5 means no association, 1.0 perfect concordance.
//!
//! # Pipeline
//!
//! - [`validate_cases`] — shape, missing values, case and category counts
//! - [`encode`] — dense rank categories for rows (state) and columns (indicator)
//! - [`build_contingency`] — occurrence matrix `A` and cumulative matrix `S`
//! - [`count_concordance`] — per-cell concordant/discordant/tied counts
//! - [`estimate_pk`] — PK, SE0, SE1
//! - [`jackknife`] — leave-one-out PK, bias-corrected PKj and SEj
//!
//! [`calculate_pk`] runs all stages and returns a [`PkResult`].
//!
//! # References
//!
//! - Smith, Dutton & Smith (1996). "Measuring the performance of anesthetic
//!   depth indicators". Anesthesiology, 84(1), 38–51.
//! - Somers (1962). "A new asymmetric measure of association for ordinal
//!   variables". American Sociological Review, 27(6), 799–811.

mod concordance;
mod contingency;
mod encode;
mod estimate;
mod jackknife;
mod result;
mod validate;

pub use concordance::{count_concordance, Concordance, RowTotals};
pub use contingency::{build_contingency, Contingency, CountMatrix};
pub use encode::{dense_ranks, encode, Categories};
pub use estimate::{estimate_pk, PkEstimate};
pub use jackknife::{jackknife, Jackknife};
pub use result::{calculate_pk, calculate_pk_with, PkResult};
pub use validate::{parse_column, validate_cases};
