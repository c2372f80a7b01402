//! linalg::ols: least-squares VAR(p) with intercept.
//!
//! The Minnesota prior scales cross-variable shrinkage by the residual
//! standard deviations of a preliminary VAR. [`ols_var`] fits that VAR
//! equation by equation (jointly, since every equation shares the same
//! regressors) and [`OlsVar::residual_scale`] returns the `σ_ols` vector the
//! prior builder consumes.
//!
//! Regressor row for time `t` (`t = p..T−1`):
//! `[y_{t−1}ᵀ, y_{t−2}ᵀ, …, y_{t−p}ᵀ, 1]`, so coefficient column
//! `(ℓ−1)·n + j` multiplies variable `j` at lag `ℓ`, matching the column
//! layout of the prior's VAR block.
use crate::linalg::{
    convert::{from_dmatrix, to_dmatrix},
    errors::{LinalgError, LinalgResult},
};
use log::debug;
use ndarray::{Array1, Array2, ArrayView2, s};

/// Least-squares VAR(p) fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsVar {
    /// n × (np + 1); row `i` is equation `i`, last column is the intercept.
    pub coefficients: Array2<f64>,
    /// (T − p) × n residuals, row `r` belongs to time `t = r + p`.
    pub residuals: Array2<f64>,
    /// n × n residual covariance with `T − p − (np + 1)` degrees of freedom.
    pub sigma: Array2<f64>,
    /// Lag order used for the fit.
    pub p: usize,
}

impl OlsVar {
    /// Residual standard deviations `√diag(Σ)`.
    pub fn residual_scale(&self) -> Array1<f64> {
        self.sigma.diag().mapv(f64::sqrt)
    }

    /// Split the slope coefficients into `B_1..B_p`, each n×n.
    pub fn lag_matrices(&self) -> Vec<Array2<f64>> {
        let n = self.coefficients.nrows();
        (0..self.p).map(|l| self.coefficients.slice(s![.., l * n..(l + 1) * n]).to_owned()).collect()
    }

    /// Intercept vector (length n).
    pub fn intercept(&self) -> Array1<f64> {
        let k = self.coefficients.ncols();
        self.coefficients.column(k - 1).to_owned()
    }
}

/// Fit a VAR(p) with intercept by ordinary least squares.
///
/// Parameters
/// ----------
/// - `y`: `ArrayView2<f64>`
///   T×n data matrix (rows are time).
/// - `p`: `usize`
///   Lag order, ≥ 1.
///
/// Returns
/// -------
/// `LinalgResult<OlsVar>`
///
/// Errors
/// ------
/// - `LinalgError::EmptyInput` if `p == 0` or `y` has no columns.
/// - `LinalgError::NonFinite` if `y` contains NaN/±inf.
/// - `LinalgError::InsufficientObservations` unless `T ≥ p + (np + 1) + 1`,
///   i.e. at least one residual degree of freedom remains.
/// - `LinalgError::Singular` when `XᵀX` cannot be Cholesky-factorized
///   (collinear regressors, e.g. a constant series).
pub fn ols_var(y: ArrayView2<f64>, p: usize) -> LinalgResult<OlsVar> {
    let (t_len, n) = y.dim();
    if p == 0 {
        return Err(LinalgError::EmptyInput { context: "VAR lag order must be at least 1" });
    }
    if n == 0 {
        return Err(LinalgError::EmptyInput { context: "VAR data has no columns" });
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite { context: "OLS VAR data" });
    }
    let k = n * p + 1;
    let required = p + k + 1;
    if t_len < required {
        return Err(LinalgError::InsufficientObservations { t_len, required });
    }

    let rows = t_len - p;
    let mut x = Array2::<f64>::zeros((rows, k));
    for r in 0..rows {
        let t = r + p;
        for l in 1..=p {
            x.slice_mut(s![r, (l - 1) * n..l * n]).assign(&y.row(t - l));
        }
        x[[r, k - 1]] = 1.0;
    }
    let target = y.slice(s![p.., ..]);

    let xtx = to_dmatrix(x.t().dot(&x).view());
    let xty = to_dmatrix(x.t().dot(&target).view());
    let chol = xtx.cholesky().ok_or(LinalgError::Singular { context: "OLS normal equations" })?;
    let beta = from_dmatrix(&chol.solve(&xty));

    let residuals = &target - &x.dot(&beta);
    let df = (rows - k) as f64;
    let sigma = residuals.t().dot(&residuals) / df;
    debug!("OLS VAR({p}) fit on {rows} observations of {n} variables ({df} residual df)");

    Ok(OlsVar { coefficients: beta.reversed_axes(), residuals, sigma, p })
}
