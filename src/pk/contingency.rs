//! Occurrence matrix `A` and its row-wise cumulative sums `S`.

use super::encode::Categories;

/// Dense row-major matrix of non-negative counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl CountMatrix {
    /// Creates a `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Sum of every entry.
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, v: u64) {
        self.data[i * self.cols + j] = v;
    }

    fn add(&mut self, i: usize, j: usize, v: u64) {
        self.data[i * self.cols + j] += v;
    }
}

/// Cross-tabulation of cases by (state category, indicator category).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contingency {
    /// `A[i][j]`: number of cases with `Ry = i` and `Cx = j`.
    pub a: CountMatrix,
    /// `S[i][j]`: `A[i][0] + … + A[i][j]`.
    pub s: CountMatrix,
}

impl Contingency {
    /// Number of cases in state category `i`, i.e. `S[i][cols - 1]`.
    pub fn row_total(&self, i: usize) -> u64 {
        self.s.get(i, self.s.cols() - 1)
    }

    /// Cases in row `i` with an indicator category below `j`.
    pub(crate) fn below(&self, i: usize, j: usize) -> u64 {
        if j == 0 {
            0
        } else {
            self.s.get(i, j - 1)
        }
    }

    /// Cases in row `i` with an indicator category above `j`.
    pub(crate) fn above(&self, i: usize, j: usize) -> u64 {
        self.row_total(i) - self.s.get(i, j)
    }
}

/// Builds `A` from the category assignment, then `S` as its row prefix sums.
///
/// # Complexity
///
/// O(n + rows·cols)
pub fn build_contingency(categories: &Categories) -> Contingency {
    let (rows, cols) = (categories.rows, categories.cols);

    let mut a = CountMatrix::zeros(rows, cols);
    for (&i, &j) in categories.state.iter().zip(&categories.indicator) {
        a.add(i, j, 1);
    }

    let mut s = CountMatrix::zeros(rows, cols);
    for i in 0..rows {
        let mut running = 0;
        for j in 0..cols {
            running += a.get(i, j);
            s.add(i, j, running);
        }
    }

    Contingency { a, s }
}
