//! diagnostics::summary: posterior summary tables.
//!
//! [`summarize_draws`] reduces an `n_draws × n_params` matrix of posterior
//! draws to one row per parameter: mean, population standard deviation
//! and the requested quantiles. Quantiles interpolate linearly between
//! order statistics at position `(n − 1)·q`. [`PosteriorSummary`]
//! implements `Display` as an aligned text table.
use crate::diagnostics::errors::{DiagnosticsError, DiagnosticsResult};
use crate::diagnostics::validation::mean_and_variance;
use ndarray::ArrayView2;
use std::fmt;

/// Quantiles reported when the caller has no preference.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.05, 0.5, 0.95];

/// Summary statistics of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub parameter: String,
    pub mean: f64,
    pub std: f64,
    /// One entry per requested quantile level, in request order.
    pub quantiles: Vec<f64>,
}

/// Table of [`SummaryRow`]s sharing one set of quantile levels.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSummary {
    levels: Vec<f64>,
    rows: Vec<SummaryRow>,
}

impl PosteriorSummary {
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Row of the named parameter, e.g. `"B_3"`.
    pub fn row(&self, parameter: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.parameter == parameter)
    }

    /// Column header for a quantile level: `q` followed by the percentage
    /// rounded to an integer (`0.05 → q5`).
    pub fn level_label(level: f64) -> String {
        format!("q{}", (level * 100.0).round() as i64)
    }
}

impl fmt::Display for PosteriorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width =
            self.rows.iter().map(|r| r.parameter.len()).chain(["parameter".len()]).max().unwrap_or(9);

        write!(f, "{:<name_width$} {:>12} {:>12}", "parameter", "mean", "std")?;
        for &level in &self.levels {
            write!(f, " {:>12}", Self::level_label(level))?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<name_width$} {:>12.6} {:>12.6}", row.parameter, row.mean, row.std)?;
            for q in &row.quantiles {
                write!(f, " {q:>12.6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Summarize posterior draws column by column.
///
/// Parameters
/// ----------
/// - `draws`: `ArrayView2<f64>`
///   `n_draws × n_params`, one column per scalar parameter.
/// - `name`: `&str`
///   Prefix for the row labels; column `i` is labelled `{name}_{i}`.
/// - `quantiles`: `&[f64]`
///   Levels in [0, 1], reported in the given order.
///
/// Returns
/// -------
/// `DiagnosticsResult<PosteriorSummary>`
///
/// Errors
/// ------
/// - `DiagnosticsError::EmptyChain` if there are no draws or no columns.
/// - `DiagnosticsError::InvalidQuantile` for a level outside [0, 1].
/// - `DiagnosticsError::NonFiniteDraw` for a NaN/±inf draw; `index` is the
///   row-major position `draw · n_params + param`.
pub fn summarize_draws(
    draws: ArrayView2<f64>, name: &str, quantiles: &[f64],
) -> DiagnosticsResult<PosteriorSummary> {
    let (n_draws, n_params) = draws.dim();
    if n_draws == 0 || n_params == 0 {
        return Err(DiagnosticsError::EmptyChain);
    }
    if let Some(&q) = quantiles.iter().find(|q| !(0.0..=1.0).contains(*q)) {
        return Err(DiagnosticsError::InvalidQuantile(q));
    }
    if let Some(((t, i), &value)) = draws.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(DiagnosticsError::NonFiniteDraw { index: t * n_params + i, value });
    }

    let rows = draws
        .columns()
        .into_iter()
        .enumerate()
        .map(|(i, col)| {
            let mut sorted: Vec<f64> = col.to_vec();
            let (mean, var) = mean_and_variance(&sorted);
            sorted.sort_by(f64::total_cmp);
            SummaryRow {
                parameter: format!("{name}_{i}"),
                mean,
                std: var.sqrt(),
                quantiles: quantiles.iter().map(|&q| linear_quantile(&sorted, q)).collect(),
            }
        })
        .collect();

    Ok(PosteriorSummary { levels: quantiles.to_vec(), rows })
}

// ---- Helper methods ----

/// Linear interpolation between order statistics; `sorted` is non-empty
/// and ascending, `q ∈ [0, 1]`.
fn linear_quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Means, population standard deviations and interpolated quantiles are
    // computed per column.
    //
    // Given
    // -----
    // - Column 0 = [1, 2, 3, 4, 5], column 1 = [10, 10, 10, 10, 20].
    // - Quantiles [0.05, 0.5, 0.95].
    //
    // Expect
    // ------
    // - Column 0: mean 3, std √2, quantiles [1.2, 3, 4.8].
    // - Column 1: mean 12, std 4, quantiles [10, 10, 18].
    fn summarize_draws_computes_column_statistics() {
        // Arrange
        let draws = array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0], [4.0, 10.0], [5.0, 20.0]];

        // Act
        let summary = summarize_draws(draws.view(), "B", &DEFAULT_QUANTILES).unwrap();

        // Assert
        let b0 = summary.row("B_0").unwrap();
        let b1 = summary.row("B_1").unwrap();
        assert_relative_eq!(b0.mean, 3.0);
        assert_relative_eq!(b0.std, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(b0.quantiles[0], 1.2, epsilon = 1e-12);
        assert_relative_eq!(b0.quantiles[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(b0.quantiles[2], 4.8, epsilon = 1e-12);
        assert_relative_eq!(b1.mean, 12.0);
        assert_relative_eq!(b1.std, 4.0, epsilon = 1e-12);
        assert_relative_eq!(b1.quantiles[1], 10.0, epsilon = 1e-12);
        assert_relative_eq!(b1.quantiles[2], 18.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The text table has a header with quantile labels and one line per
    // parameter.
    //
    // Given
    // -----
    // - A 3×2 draw matrix named "phi", default quantiles.
    //
    // Expect
    // ------
    // - Header contains "parameter", "mean", "std", "q5", "q50", "q95";
    //   3 lines in total; rows labelled phi_0 and phi_1.
    fn posterior_summary_display_renders_table() {
        let draws = array![[0.1, 1.0], [0.2, 2.0], [0.3, 3.0]];
        let summary = summarize_draws(draws.view(), "phi", &DEFAULT_QUANTILES).unwrap();

        let table = summary.to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        for label in ["parameter", "mean", "std", "q5", "q50", "q95"] {
            assert!(lines[0].contains(label), "header missing {label}: {}", lines[0]);
        }
        assert!(lines[1].starts_with("phi_0"));
        assert!(lines[2].starts_with("phi_1"));
    }

    #[test]
    // Purpose
    // -------
    // Empty input, invalid quantiles and non-finite draws are rejected.
    //
    // Given
    // -----
    // - A 0×2 matrix; quantile 1.2; a NaN at (1, 0) in a 2×2 matrix.
    //
    // Expect
    // ------
    // - `EmptyChain`, `InvalidQuantile(1.2)`, `NonFiniteDraw { index: 2 }`.
    fn summarize_draws_rejects_invalid_input() {
        let empty = ndarray::Array2::<f64>::zeros((0, 2));
        let ok = array![[1.0, 2.0], [3.0, 4.0]];
        let nan = array![[1.0, 2.0], [f64::NAN, 4.0]];

        assert_eq!(
            summarize_draws(empty.view(), "x", &DEFAULT_QUANTILES),
            Err(DiagnosticsError::EmptyChain)
        );
        assert_eq!(
            summarize_draws(ok.view(), "x", &[0.5, 1.2]),
            Err(DiagnosticsError::InvalidQuantile(1.2))
        );
        assert!(matches!(
            summarize_draws(nan.view(), "x", &DEFAULT_QUANTILES),
            Err(DiagnosticsError::NonFiniteDraw { index: 2, .. })
        ));
    }
}
