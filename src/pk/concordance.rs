//! Concordant, discordant and tied comparison counts per occupied cell.
//!
//! # Algorithm
//!
//! For an occupied cell `(i, j)` every case in another row `ai` is exactly
//! one of concordant, discordant, or tied on the indicator:
//!
//! ```text
//! ai < i:  C += S[ai][j-1]               D += S[ai][last] - S[ai][j]
//! ai > i:  C += S[ai][last] - S[ai][j]   D += S[ai][j-1]
//! both:    T += A[ai][j]
//! ```
//!
//! Weighting each cell's counts by `A[i][j]` and summing gives ordered-pair
//! totals, so every unordered pair of cases is counted twice.
//!
//! # Complexity
//!
//! O(rows² · cols)

use super::contingency::{Contingency, CountMatrix};

/// Per-row aggregates of the weighted cell counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowTotals {
    /// `n_i`: number of cases in the row.
    pub n: u64,
    /// `Qc_i = Σ_j A[i][j] · C[i][j]`.
    pub concordant: u64,
    /// `Qd_i = Σ_j A[i][j] · D[i][j]`.
    pub discordant: u64,
    /// `Qt_i = Σ_j A[i][j] · T[i][j]`.
    pub tied: u64,
}

/// Output of the concordance counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concordance {
    /// `C[i][j]`: cross-row cases concordant with a case in cell `(i, j)`.
    pub c: CountMatrix,
    /// `D[i][j]`: cross-row cases discordant with a case in cell `(i, j)`.
    pub d: CountMatrix,
    /// `T[i][j]`: cross-row cases tied on the indicator with cell `(i, j)`.
    pub t: CountMatrix,
    /// Per-row aggregates.
    pub row_totals: Vec<RowTotals>,
    /// Total number of cases `n`.
    pub n: u64,
    /// `Qc`: concordant ordered pairs.
    pub qc: u64,
    /// `Qd`: discordant ordered pairs.
    pub qd: u64,
    /// `Qtx`: ordered pairs tied on the indicator only.
    pub qtx: u64,
    /// `Qcc = Σ A·C²`.
    pub qcc: u64,
    /// `Qdd = Σ A·D²`.
    pub qdd: u64,
    /// `Qcd = Σ A·C·D`.
    pub qcd: u64,
}

impl Concordance {
    /// `Qcdt = Qc + Qd + Qtx`.
    pub fn qcdt(&self) -> u64 {
        self.qc + self.qd + self.qtx
    }
}

/// Counts concordant, discordant and tied comparisons for every occupied cell.
pub fn count_concordance(table: &Contingency) -> Concordance {
    let rows = table.a.rows();
    let cols = table.a.cols();

    let mut c = CountMatrix::zeros(rows, cols);
    let mut d = CountMatrix::zeros(rows, cols);
    let mut t = CountMatrix::zeros(rows, cols);
    let mut row_totals = vec![RowTotals::default(); rows];
    let (mut qcc, mut qdd, mut qcd) = (0u64, 0u64, 0u64);

    for i in 0..rows {
        for j in 0..cols {
            let a = table.a.get(i, j);
            if a == 0 {
                continue;
            }

            let (mut cij, mut dij, mut tij) = (0u64, 0u64, 0u64);
            for ai in (0..rows).filter(|&ai| ai != i) {
                let (below, above) = (table.below(ai, j), table.above(ai, j));
                if ai < i {
                    cij += below;
                    dij += above;
                } else {
                    cij += above;
                    dij += below;
                }
                tij += table.a.get(ai, j);
            }
            c.set(i, j, cij);
            d.set(i, j, dij);
            t.set(i, j, tij);

            let totals = &mut row_totals[i];
            totals.concordant += a * cij;
            totals.discordant += a * dij;
            totals.tied += a * tij;
            qcc += a * cij * cij;
            qdd += a * dij * dij;
            qcd += a * cij * dij;
        }
        row_totals[i].n = table.row_total(i);
    }

    let n = row_totals.iter().map(|r| r.n).sum();
    let qc = row_totals.iter().map(|r| r.concordant).sum();
    let qd = row_totals.iter().map(|r| r.discordant).sum();
    let qtx = row_totals.iter().map(|r| r.tied).sum();

    Concordance {
        c,
        d,
        t,
        row_totals,
        n,
        qc,
        qd,
        qtx,
        qcc,
        qdd,
        qcd,
    }
}
