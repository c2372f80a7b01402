//! linalg::companion: companion form, stationarity and impulse responses.
//!
//! Purpose
//! -------
//! Rewrite a VAR(p) with coefficient matrices `B_1..B_p` (each n×n) as the
//! first-order system `Y_t = F Y_{t−1}`, where `Y_t` stacks `y_t..y_{t−p+1}`,
//! and derive the quantities a sampler checks for every draw.
//!
//! Key behaviors
//! -------------
//! - [`companion_matrix`] builds the np×np matrix `F` with top block row
//!   `[B_1 … B_p]` and an identity on the first sub-diagonal block.
//! - [`check_stationarity`] reports the spectral radius of `F` from its
//!   complex eigenvalues; the VAR is stationary iff the radius is < 1.
//! - [`impulse_response`] returns `Ψ_h = (F^h)[:n, :n] · B0⁻¹` for
//!   `h = 0..horizon−1`, so `Ψ_0 = B0⁻¹`.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one coefficient matrix is required and every `B_i` must be
//!   square with the same `n`.
//! - Nothing is assumed about stationarity when computing impulse
//!   responses; explosive systems simply produce growing responses.
//!
//! Testing notes
//! -------------
//! - Unit tests cover scalar-multiple-of-identity, rotation and explosive
//!   VAR(1) cases, the VAR(2) block layout, and the first IRF steps.
use crate::linalg::{
    convert::to_dmatrix,
    errors::{LinalgError, LinalgResult},
};
use log::debug;
use ndarray::{Array2, Array3, ArrayView2, s};

/// Outcome of a stationarity check on a VAR coefficient set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationarityReport {
    /// `true` iff `spectral_radius < 1`.
    pub is_stationary: bool,
    /// Largest modulus among the companion matrix eigenvalues.
    pub spectral_radius: f64,
}

/// Build the companion matrix of a VAR(p).
///
/// Parameters
/// ----------
/// - `coefs`: `&[Array2<f64>]`
///   Lag matrices `B_1..B_p`, each n×n.
///
/// Returns
/// -------
/// `LinalgResult<Array2<f64>>`
///   The np×np companion matrix.
///
/// Errors
/// ------
/// - `LinalgError::EmptyInput` when `coefs` is empty.
/// - `LinalgError::NotSquare` if `B_1` is not square.
/// - `LinalgError::ShapeMismatch` if a later `B_i` is not n×n.
pub fn companion_matrix(coefs: &[Array2<f64>]) -> LinalgResult<Array2<f64>> {
    let n = validate_lag_matrices(coefs)?;
    let p = coefs.len();
    let np = n * p;

    let mut f = Array2::<f64>::zeros((np, np));
    for (i, b) in coefs.iter().enumerate() {
        f.slice_mut(s![0..n, i * n..(i + 1) * n]).assign(b);
    }
    for i in n..np {
        f[[i, i - n]] = 1.0;
    }
    Ok(f)
}

/// Check whether a VAR(p) is covariance-stationary.
///
/// Parameters
/// ----------
/// - `coefs`: `&[Array2<f64>]`
///   Lag matrices `B_1..B_p`, each n×n.
///
/// Returns
/// -------
/// `LinalgResult<StationarityReport>`
///   Spectral radius of the companion matrix and the `radius < 1` verdict.
///
/// Errors
/// ------
/// - As in [`companion_matrix`].
/// - `LinalgError::NonFinite` if a coefficient is NaN/±inf.
pub fn check_stationarity(coefs: &[Array2<f64>]) -> LinalgResult<StationarityReport> {
    let f = companion_matrix(coefs)?;
    if f.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite { context: "VAR coefficients" });
    }

    let spectral_radius = to_dmatrix(f.view())
        .complex_eigenvalues()
        .iter()
        .map(|lambda| lambda.norm())
        .fold(0.0_f64, f64::max);
    let is_stationary = spectral_radius < 1.0;
    debug!("stationarity check: spectral radius {spectral_radius:.6}, stationary = {is_stationary}");

    Ok(StationarityReport { is_stationary, spectral_radius })
}

/// Structural impulse responses of a VAR(p).
///
/// Parameters
/// ----------
/// - `coefs`: `&[Array2<f64>]`
///   Lag matrices `B_1..B_p`, each n×n.
/// - `b0_inv`: `ArrayView2<f64>`
///   Contemporaneous impact `B0⁻¹`, n×n.
/// - `horizon`: `usize`
///   Number of response periods returned (including the impact period).
///
/// Returns
/// -------
/// `LinalgResult<Array3<f64>>`
///   Array of shape `horizon × n × n`; slice `h` holds `Ψ_h`, whose
///   column `j` is the response of all variables to structural shock `j`.
///
/// Errors
/// ------
/// - As in [`companion_matrix`].
/// - `LinalgError::ShapeMismatch` if `b0_inv` is not n×n.
pub fn impulse_response(
    coefs: &[Array2<f64>], b0_inv: ArrayView2<f64>, horizon: usize,
) -> LinalgResult<Array3<f64>> {
    let f = companion_matrix(coefs)?;
    let n = coefs[0].nrows();
    if b0_inv.dim() != (n, n) {
        return Err(LinalgError::ShapeMismatch { expected: (n, n), actual: b0_inv.dim() });
    }

    let mut irf = Array3::<f64>::zeros((horizon, n, n));
    if horizon == 0 {
        return Ok(irf);
    }
    irf.slice_mut(s![0, .., ..]).assign(&b0_inv);

    let mut f_pow = f.clone();
    for h in 1..horizon {
        let response = f_pow.slice(s![0..n, 0..n]).dot(&b0_inv);
        irf.slice_mut(s![h, .., ..]).assign(&response);
        f_pow = f_pow.dot(&f);
    }
    Ok(irf)
}

// ---- Helper methods ----

fn validate_lag_matrices(coefs: &[Array2<f64>]) -> LinalgResult<usize> {
    let first = coefs.first().ok_or(LinalgError::EmptyInput { context: "VAR lag matrices" })?;
    let (rows, cols) = first.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if let Some(bad) = coefs.iter().find(|b| b.dim() != (rows, rows)) {
        return Err(LinalgError::ShapeMismatch { expected: (rows, rows), actual: bad.dim() });
    }
    Ok(rows)
}
