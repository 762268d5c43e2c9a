//! Tabular display of PK results and comparisons.
//!
//! Every function returns a [`comfy_table::Table`]; print it with `{}`.
//!
//! # Examples
//!
//! ```
//! use u_pk::pk::calculate_pk;
//! use u_pk::report::{matrix_table, pk_table};
//!
//! let r = calculate_pk(&[1.0, 2.0, 2.0, 3.0], &[1.0, 1.0, 2.0, 2.0]).unwrap();
//! let text = pk_table(&r).to_string();
//! assert!(text.contains("0.875"));
//!
//! let a = matrix_table("A", r.a()).to_string();
//! assert!(a.contains("y0"));
//! ```

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Table};

use crate::compare::PkComparison;
use crate::pk::{CountMatrix, PkResult};

/// Decimal places shown for statistics.
const PRECISION: usize = 3;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn fmt(v: f64) -> String {
    format!("{v:.prec$}", prec = PRECISION)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), fmt)
}

/// One-row summary: PK, SE0, SE1, jack_ok, PKj, SEj.
pub fn pk_table(result: &PkResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["PK", "SE0", "SE1", "jack_ok", "PKj", "SEj"]);
    table.add_row(vec![
        Cell::new(fmt(result.pk())),
        Cell::new(fmt(result.se0())),
        Cell::new(fmt(result.se1())),
        Cell::new(result.jack_ok()),
        Cell::new(fmt_opt(result.pkj())),
        Cell::new(fmt_opt(result.sej())),
    ]);
    table
}

/// A count matrix with state categories as rows and indicator categories
/// as columns.
pub fn matrix_table(name: &str, matrix: &CountMatrix) -> Table {
    let mut table = new_table();
    let mut header = vec![name.to_string()];
    header.extend((0..matrix.cols()).map(|j| format!("x{j}")));
    table.set_header(header);

    for i in 0..matrix.rows() {
        let mut row = vec![Cell::new(format!("y{i}"))];
        row.extend(matrix.row(i).iter().map(|v| Cell::new(v)));
        table.add_row(row);
    }
    table
}

/// Per-case table: original values, categories and leave-one-out PK.
pub fn cases_table(x: &[f64], y: &[f64], result: &PkResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["k", "x", "y", "Ry", "Cx", "PKm"]);
    let pkm = result.pkm();
    for k in 0..result.n_case {
        table.add_row(vec![
            Cell::new(k),
            Cell::new(x.get(k).map_or_else(String::new, |v| v.to_string())),
            Cell::new(y.get(k).map_or_else(String::new, |v| v.to_string())),
            Cell::new(result.categories.state[k]),
            Cell::new(result.categories.indicator[k]),
            Cell::new(fmt_opt(pkm.map(|p| p[k]))),
        ]);
    }
    table
}

/// Group and paired comparison statistics.
pub fn comparison_table(comparison: &PkComparison) -> Table {
    let mut table = new_table();
    table.set_header(vec!["test", "difference", "SE", "statistic", "df", "p", "judgement"]);
    table.add_row(vec![
        Cell::new("groups"),
        Cell::new(fmt(comparison.pkd)),
        Cell::new(fmt(comparison.sed)),
        Cell::new(format!("z = {}", fmt(comparison.zd))),
        Cell::new("-"),
        Cell::new(fmt(comparison.zp)),
        Cell::new(comparison.z_judgement),
    ]);
    table.add_row(vec![
        Cell::new("pairs"),
        Cell::new(fmt(comparison.pkdj)),
        Cell::new(fmt(comparison.sedj)),
        Cell::new(format!("t = {}", fmt(comparison.td))),
        Cell::new(comparison.df),
        Cell::new(fmt(comparison.tp)),
        Cell::new(comparison.t_judgement),
    ]);
    table
}
