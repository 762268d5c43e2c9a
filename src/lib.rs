//! # u-pk
//!
//! PK, a rank-concordance effect size for ordinal indicators, with
//! jackknife standard errors and tests comparing two indicators.
//!
//! PK quantifies how well an ordinal indicator (e.g. a depth-of-anesthesia
//! index) predicts an ordinal state (e.g. a clinical sedation score). It
//! operates on raw paired `f64` observations and knows nothing about the
//! consumer domain.
//!
//! ## Modules
//!
//! - [`pk`] — PK estimation: categories, contingency and concordance
//!   counts, PK/SE0/SE1, jackknife PKj/SEj
//! - [`compare`] — group z-test and paired t-test between two PK results
//! - [`report`] — tabular display of results
//! - [`config`] — degeneracy/jackknife policies and root-finder parameters
//! - [`error`] — error taxonomy
//!
//! ## Example
//!
//! ```
//! use u_pk::compare::compare_pks;
//! use u_pk::pk::calculate_pk;
//!
//! let state = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0];
//! let bis = [40.0, 45.0, 52.0, 50.0, 61.0, 66.0, 70.0, 78.0];
//! let mac = [0.9, 1.1, 0.8, 1.0, 0.7, 0.9, 0.6, 0.5];
//!
//! let r1 = calculate_pk(&bis, &state).unwrap();
//! let r2 = calculate_pk(&mac, &state).unwrap();
//! assert!(r1.pk() > 0.9);
//! assert!(r2.pk() < 0.5);
//!
//! let c = compare_pks(&r1, &r2).unwrap();
//! assert!(c.pkd > 0.0);
//! ```
//!
//! ## Design Philosophy
//!
//! - **Single pass**: each stage returns its own immutable output
//! - **Explicit failures**: every validation problem is a typed [`error::PkError`]
//! - **Research-backed**: Smith, Dutton & Smith (1996), Anesthesiology 84(1)

pub mod compare;
pub mod config;
pub mod error;
pub mod pk;
pub mod report;

pub use error::{PkError, Result};
