//! Dense rank categories for the state (rows) and indicator (columns).

/// Category assignment for every case, in original case order.
#[derive(Debug, Clone, PartialEq)]
pub struct Categories {
    /// Row category `Ry[k]` of each case (dense, 0-based).
    pub state: Vec<usize>,
    /// Column category `Cx[k]` of each case (dense, 0-based).
    pub indicator: Vec<usize>,
    /// Number of distinct state values.
    pub rows: usize,
    /// Number of distinct indicator values.
    pub cols: usize,
    /// Number of cases in each state category.
    pub state_counts: Vec<usize>,
    /// Whether the leave-one-out jackknife can be run.
    pub jackknife_ok: bool,
}

/// Assigns dense 0-based ranks: equal values share a rank, successive
/// distinct values get consecutive ranks in ascending order.
///
/// # Returns
///
/// `(ranks, distinct)` where `ranks[k]` is the rank of `data[k]`.
///
/// # Examples
///
/// ```
/// use u_pk::pk::dense_ranks;
///
/// let (ranks, distinct) = dense_ranks(&[3.0, 1.0, 3.0, 2.0]);
/// assert_eq!(ranks, vec![2, 0, 2, 1]);
/// assert_eq!(distinct, 3);
/// ```
pub fn dense_ranks(data: &[f64]) -> (Vec<usize>, usize) {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0; data.len()];
    let mut rank = 0;
    for (pos, &k) in order.iter().enumerate() {
        // -0.0 and 0.0 sort adjacently and compare equal, so they share a rank
        if pos > 0 && data[k] != data[order[pos - 1]] {
            rank += 1;
        }
        ranks[k] = rank;
    }

    let distinct = if data.is_empty() { 0 } else { rank + 1 };
    (ranks, distinct)
}

/// Encodes both variables and decides jackknife feasibility.
///
/// The jackknife is infeasible when some state category holds a single case,
/// except that more than two state categories always count as feasible.
pub fn encode(x: &[f64], y: &[f64]) -> Categories {
    let (state, rows) = dense_ranks(y);
    let (indicator, cols) = dense_ranks(x);

    let mut state_counts = vec![0; rows];
    for &r in &state {
        state_counts[r] += 1;
    }

    let sparse = state_counts.iter().any(|&c| c < 2);
    let jackknife_ok = !sparse || rows > 2;
    if sparse && rows > 2 {
        log::warn!(
            "state has {rows} categories, some with a single case; jackknife treated as feasible"
        );
    }

    Categories {
        state,
        indicator,
        rows,
        cols,
        state_counts,
        jackknife_ok,
    }
}
