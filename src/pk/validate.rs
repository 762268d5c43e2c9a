//! Input validation.
//!
//! Checks run in a fixed order, so a given input always fails with the same
//! error: missing values, then case counts, then the number of distinct
//! state values.

use crate::error::{PkError, Result, Variable};

/// Tokens treated as missing when parsing textual cells.
const MISSING_TOKENS: [&str; 5] = ["", "na", "nan", "null", "none"];

/// Validates a pair of indicator/state sequences.
///
/// # Returns
///
/// The number of cases `n` on success.
///
/// # Errors
///
/// - [`PkError::MissingValue`] if either sequence contains NaN
/// - [`PkError::InsufficientCases`] if lengths differ or `n < 2`
/// - [`PkError::InsufficientCategories`] if `y` has fewer than 2 distinct values
pub fn validate_cases(x: &[f64], y: &[f64]) -> Result<usize> {
    check_missing(Variable::Indicator, x)?;
    check_missing(Variable::State, y)?;

    if x.len() != y.len() || x.len() < 2 {
        return Err(PkError::InsufficientCases {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let distinct = count_distinct(y);
    if distinct < 2 {
        return Err(PkError::InsufficientCategories { distinct });
    }

    Ok(x.len())
}

/// Converts textual cells into numbers for [`validate_cases`].
///
/// Empty cells and `NA`/`NaN`/`null`/`None` (any case) are missing values.
///
/// # Errors
///
/// - [`PkError::MissingValue`] for a missing cell
/// - [`PkError::InvalidType`] for a cell that is not a number
///
/// # Examples
///
/// ```
/// use u_pk::error::{PkError, Variable};
/// use u_pk::pk::parse_column;
///
/// let x = parse_column(Variable::Indicator, &["1", " 2.5", "3"]).unwrap();
/// assert_eq!(x, vec![1.0, 2.5, 3.0]);
///
/// let err = parse_column(Variable::State, &["1", "high"]).unwrap_err();
/// assert!(matches!(err, PkError::InvalidType { index: 1, .. }));
/// ```
pub fn parse_column<S: AsRef<str>>(variable: Variable, cells: &[S]) -> Result<Vec<f64>> {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let raw = cell.as_ref().trim();
            if MISSING_TOKENS.contains(&raw.to_ascii_lowercase().as_str()) {
                return Err(PkError::MissingValue { variable, index });
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_nan() => Err(PkError::MissingValue { variable, index }),
                Ok(v) => Ok(v),
                Err(_) => Err(PkError::InvalidType {
                    variable,
                    index,
                    value: raw.to_string(),
                }),
            }
        })
        .collect()
}

fn check_missing(variable: Variable, data: &[f64]) -> Result<()> {
    match data.iter().position(|v| v.is_nan()) {
        Some(index) => Err(PkError::MissingValue { variable, index }),
        None => Ok(()),
    }
}

fn count_distinct(data: &[f64]) -> usize {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_pairs() {
        assert_eq!(validate_cases(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), Ok(3));
        // constant indicator is fine, only y needs two levels
        assert_eq!(validate_cases(&[0.0, 0.0], &[1.0, 2.0]), Ok(2));
    }

    #[test]
    fn single_case_is_insufficient() {
        assert_eq!(
            validate_cases(&[1.0], &[1.0]),
            Err(PkError::InsufficientCases { x_len: 1, y_len: 1 })
        );
    }

    #[test]
    fn length_mismatch_is_insufficient() {
        assert!(matches!(
            validate_cases(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(PkError::InsufficientCases { x_len: 3, y_len: 2 })
        ));
    }

    #[test]
    fn single_state_category() {
        assert_eq!(
            validate_cases(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]),
            Err(PkError::InsufficientCategories { distinct: 1 })
        );
    }

    #[test]
    fn nan_is_missing() {
        assert_eq!(
            validate_cases(&[1.0, f64::NAN], &[1.0, 2.0]),
            Err(PkError::MissingValue {
                variable: Variable::Indicator,
                index: 1
            })
        );
        assert_eq!(
            validate_cases(&[1.0, 2.0], &[f64::NAN, 2.0]),
            Err(PkError::MissingValue {
                variable: Variable::State,
                index: 0
            })
        );
    }

    #[test]
    fn missing_checked_before_length() {
        let err = validate_cases(&[f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PkError::MissingValue { .. }));
    }

    #[test]
    fn parse_missing_tokens() {
        for token in ["", "  ", "NA", "nan", "NULL", "None"] {
            let err = parse_column(Variable::Indicator, &["1", token]).unwrap_err();
            assert_eq!(
                err,
                PkError::MissingValue {
                    variable: Variable::Indicator,
                    index: 1
                },
                "token {token:?}"
            );
        }
    }

    #[test]
    fn parse_non_numeric() {
        let err = parse_column(Variable::State, &["awake", "2"]).unwrap_err();
        assert_eq!(
            err,
            PkError::InvalidType {
                variable: Variable::State,
                index: 0,
                value: "awake".to_string()
            }
        );
    }

    #[test]
    fn parse_numbers() {
        let v = parse_column(Variable::State, &["-1", "2e1", "0.5"]).expect("should parse");
        assert_eq!(v, vec![-1.0, 20.0, 0.5]);
    }
}
