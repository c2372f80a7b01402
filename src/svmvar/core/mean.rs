//! Conditional-mean engine for the observation and common-factor equations.
//!
//! Purpose
//! -------
//! Evaluate the deterministic part of the two OI-SVMVAR mean equations for
//! a full sample, given coefficient blocks supplied by a sampler or an
//! optimizer:
//!
//! - observation equation, for `t ≥ max(p, q)`:
//!   `μ_t = Σ_{i=1..p} B_i y_{t−i} + Σ_{j=0..q} A_j h_{t−j}`;
//! - common-factor equation, for `t ≥ max(ph, py)`:
//!   `h̄_t = Σ_{i=1..ph} Φ_i h_{t−i} + Σ_{j=1..py} Ψ_j y_{t−j}`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Rows before the burn-in threshold are zero; they are not back-filled
//!   from partial lag information.
//! - Lags come from [`build_lags`], so lag slot `ℓ` is the `(ℓ + 1)`-period
//!   lag in both equations.
//! - `h` is T×2 with column 0 = macro factor and column 1 = financial
//!   factor.
//!
//! Conventions
//! -----------
//! - Shape problems are reported before any arithmetic: `y` must be T×n,
//!   `h` T×2, and every coefficient matrix must match `n = y.ncols()`.
//! - A sample shorter than the burn-in yields an all-zero mean.
use crate::svmvar::{
    core::{
        lags::build_lags,
        params::{HEquationCoefficients, VARCoefficients, VolInMeanCoefficients},
        validation::{validate_coefficient_block, validate_matrix_shape},
    },
    errors::SVMVARResult,
};
use ndarray::{Array2, ArrayView2, s};

/// VAR conditional mean with volatility-in-mean terms.
///
/// Parameters
/// ----------
/// - `y`: `ArrayView2<f64>`
///   T×n observations.
/// - `h`: `ArrayView2<f64>`
///   T×2 common log-volatility factors `(h_m, h_f)`.
/// - `b`: `&VARCoefficients`
///   `B₁…B_p`, each n×n.
/// - `a`: `&VolInMeanCoefficients`
///   `A₀…A_q`, each n×2.
///
/// Returns
/// -------
/// `SVMVARResult<Array2<f64>>`
///   T×n matrix whose row `t` is `μ_t` (zero for `t < max(p, q)`).
///
/// Errors
/// ------
/// - `SVMVARError::CoefficientShape` if `B_i` is not n×n or `A_j` not n×2
///   for `n = y.ncols()`.
/// - `SVMVARError::SeriesShape` if `h` is not T×2.
pub fn var_mean(
    y: ArrayView2<f64>, h: ArrayView2<f64>, b: &VARCoefficients, a: &VolInMeanCoefficients,
) -> SVMVARResult<Array2<f64>> {
    let (t_len, n) = y.dim();
    validate_coefficient_block("B", b.matrices(), (n, n))?;
    validate_coefficient_block("A", a.matrices(), (n, 2))?;
    validate_matrix_shape("h", h, (t_len, 2))?;

    let p = b.p();
    let q = a.q();
    let y_lags = build_lags(y, p);
    let mut mu = Array2::<f64>::zeros((t_len, n));

    for t in p.max(q)..t_len {
        let mut row = mu.row_mut(t);
        for (i, b_i) in b.matrices().iter().enumerate() {
            row += &b_i.dot(&y_lags.slice(s![t, .., i]));
        }
        for (j, a_j) in a.matrices().iter().enumerate() {
            row += &a_j.dot(&h.row(t - j));
        }
    }
    Ok(mu)
}

/// Conditional mean of the common log-volatility factors.
///
/// Parameters
/// ----------
/// - `h`: `ArrayView2<f64>`
///   T×2 common factors.
/// - `y`: `ArrayView2<f64>`
///   T×n observations feeding the `Ψ` link.
/// - `coefs`: `&HEquationCoefficients`
///   `Φ₁…Φ_ph` (2×2) and `Ψ₁…Ψ_py` (2×n).
///
/// Returns
/// -------
/// `SVMVARResult<Array2<f64>>`
///   T×2 matrix whose row `t` is `h̄_t` (zero for `t < max(ph, py)`).
///
/// Errors
/// ------
/// - `SVMVARError::SeriesShape` if `h` is not T×2 with `T = y.nrows()`.
/// - `SVMVARError::CoefficientShape` if `Φ_i` is not 2×2 or `Ψ_j` not 2×n.
pub fn h_mean(
    h: ArrayView2<f64>, y: ArrayView2<f64>, coefs: &HEquationCoefficients,
) -> SVMVARResult<Array2<f64>> {
    let (t_len, n) = y.dim();
    validate_matrix_shape("h", h, (t_len, 2))?;
    validate_coefficient_block("Phi", coefs.phi(), (2, 2))?;
    validate_coefficient_block("Psi", coefs.psi(), (2, n))?;

    let ph = coefs.ph();
    let py = coefs.py();
    let h_lags = build_lags(h, ph);
    let y_lags = build_lags(y, py);
    let mut out = Array2::<f64>::zeros((t_len, 2));

    for t in ph.max(py)..t_len {
        let mut row = out.row_mut(t);
        for (i, phi_i) in coefs.phi().iter().enumerate() {
            row += &phi_i.dot(&h_lags.slice(s![t, .., i]));
        }
        for (j, psi_j) in coefs.psi().iter().enumerate() {
            row += &psi_j.dot(&y_lags.slice(s![t, .., j]));
        }
    }
    Ok(out)
}
