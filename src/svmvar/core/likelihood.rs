//! Likelihood evaluator for the structural observation equation.
//!
//! Purpose
//! -------
//! Score observations under `y_t = μ_t + B0⁻¹ ε_t`, `ε_t ~ N(0, diag(Ω_t))`:
//!
//! `ℓ_t = −n/2 · ln 2π − ½ Σ_i ln Ω_t,i + ln|det B0| − ½ Σ_i ε_t,i² / Ω_t,i`,
//!
//! with structural residuals `ε_t = B0 (y_t − μ_t)` and `B0 = (B0⁻¹)⁻¹`.
//!
//! Key behaviors
//! -------------
//! - [`log_likelihood_contribution`] scores one period.
//! - [`log_likelihood_contributions`] and [`log_likelihood`] score a sample
//!   from a start index, inverting `B0⁻¹` once for all periods.
//!
//! Invariants & assumptions
//! ------------------------
//! - Variances must be strictly positive; a zero, negative or NaN entry is
//!   a numerical error, never clipped here. Callers that hold
//!   log-volatilities should go through
//!   [`TotalLogVolatility::variances`](crate::svmvar::core::volatility::TotalLogVolatility::variances),
//!   which is positive by construction.
//! - `B0⁻¹` is rejected as singular when `|det B0⁻¹| < SINGULAR_TOL`.
//!
//! Conventions
//! -----------
//! - Vectors have length n; sample matrices are T×n with rows as time.
use crate::{
    linalg::convert::{from_dmatrix, to_dmatrix},
    numerical_stability::transformations::SINGULAR_TOL,
    svmvar::{
        core::validation::{validate_length, validate_matrix_shape},
        errors::{SVMVARError, SVMVARResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::f64::consts::PI;

/// `B0` recovered from `B0⁻¹` together with `ln|det B0|`.
struct StructuralImpact {
    b0: Array2<f64>,
    log_abs_det_b0: f64,
}

impl StructuralImpact {
    fn from_inverse(b0_inv: ArrayView2<f64>, n: usize) -> SVMVARResult<Self> {
        validate_matrix_shape("B0_inv", b0_inv, (n, n))?;
        let lu = to_dmatrix(b0_inv).lu();
        let determinant = lu.determinant();
        if !determinant.is_finite() || determinant.abs() < SINGULAR_TOL {
            return Err(SVMVARError::SingularImpactMatrix { determinant });
        }
        let b0 = lu.try_inverse().ok_or(SVMVARError::SingularImpactMatrix { determinant })?;
        Ok(StructuralImpact { b0: from_dmatrix(&b0), log_abs_det_b0: -determinant.abs().ln() })
    }

    fn score(&self, y_t: ArrayView1<f64>, mu_t: ArrayView1<f64>, omega_t: ArrayView1<f64>) -> f64 {
        let n = y_t.len() as f64;
        let eps = self.b0.dot(&(&y_t - &mu_t));
        let log_var: f64 = omega_t.iter().map(|w| w.ln()).sum();
        let quad: f64 = eps.iter().zip(omega_t.iter()).map(|(e, w)| e * e / w).sum();
        -0.5 * n * (2.0 * PI).ln() - 0.5 * log_var + self.log_abs_det_b0 - 0.5 * quad
    }
}

/// One-period log-likelihood contribution.
///
/// Parameters
/// ----------
/// - `y_t`: `ArrayView1<f64>`
///   Observation vector (length n).
/// - `mu_t`: `ArrayView1<f64>`
///   Conditional mean (length n).
/// - `b0_inv`: `ArrayView2<f64>`
///   Impact matrix inverse `B0⁻¹` (n×n).
/// - `omega_t`: `ArrayView1<f64>`
///   Structural shock variances (length n), strictly positive.
///
/// Returns
/// -------
/// `SVMVARResult<f64>`
///
/// Errors
/// ------
/// - `SVMVARError::LengthMismatch` if `mu_t` or `omega_t` does not have
///   length n.
/// - `SVMVARError::SeriesShape` if `b0_inv` is not n×n.
/// - `SVMVARError::NonPositiveVariance` for the first `Ω_t,i ≤ 0` or NaN.
/// - `SVMVARError::SingularImpactMatrix` if `|det B0⁻¹| < SINGULAR_TOL`.
pub fn log_likelihood_contribution(
    y_t: ArrayView1<f64>, mu_t: ArrayView1<f64>, b0_inv: ArrayView2<f64>,
    omega_t: ArrayView1<f64>,
) -> SVMVARResult<f64> {
    let n = y_t.len();
    validate_length("mu_t", mu_t.len(), n)?;
    validate_length("omega_t", omega_t.len(), n)?;
    validate_variances(omega_t)?;
    let impact = StructuralImpact::from_inverse(b0_inv, n)?;
    Ok(impact.score(y_t, mu_t, omega_t))
}

/// Per-period contributions `ℓ_start … ℓ_{T−1}`.
///
/// Parameters
/// ----------
/// - `y`, `mu`, `omega`: `ArrayView2<f64>`
///   T×n observations, conditional means and variances.
/// - `b0_inv`: `ArrayView2<f64>`
///   n×n impact matrix inverse, shared by all periods.
/// - `start`: `usize`
///   First scored period (typically the mean burn-in `max(p, q)`).
///
/// Returns
/// -------
/// `SVMVARResult<Array1<f64>>` of length `T − start` (empty if `start ≥ T`).
///
/// Errors
/// ------
/// - `SVMVARError::SeriesShape` if `mu` or `omega` is not T×n, or `b0_inv`
///   not n×n.
/// - `SVMVARError::NonPositiveVariance` for a non-positive variance in a
///   scored period; `index` is the flat row-major position `t·n + i`.
/// - `SVMVARError::SingularImpactMatrix` as above.
pub fn log_likelihood_contributions(
    y: ArrayView2<f64>, mu: ArrayView2<f64>, b0_inv: ArrayView2<f64>, omega: ArrayView2<f64>,
    start: usize,
) -> SVMVARResult<Array1<f64>> {
    let (t_len, n) = y.dim();
    validate_matrix_shape("mu", mu, (t_len, n))?;
    validate_matrix_shape("omega", omega, (t_len, n))?;
    let impact = StructuralImpact::from_inverse(b0_inv, n)?;

    let mut out = Array1::<f64>::zeros(t_len.saturating_sub(start));
    for (k, t) in (start..t_len).enumerate() {
        let omega_t = omega.row(t);
        validate_variances(omega_t).map_err(|err| match err {
            SVMVARError::NonPositiveVariance { index, value } => {
                SVMVARError::NonPositiveVariance { index: t * n + index, value }
            }
            other => other,
        })?;
        out[k] = impact.score(y.row(t), mu.row(t), omega_t);
    }
    Ok(out)
}

/// Sample log-likelihood `Σ_{t=start}^{T−1} ℓ_t`.
///
/// See [`log_likelihood_contributions`] for parameters and errors.
pub fn log_likelihood(
    y: ArrayView2<f64>, mu: ArrayView2<f64>, b0_inv: ArrayView2<f64>, omega: ArrayView2<f64>,
    start: usize,
) -> SVMVARResult<f64> {
    Ok(log_likelihood_contributions(y, mu, b0_inv, omega, start)?.sum())
}

fn validate_variances(omega_t: ArrayView1<f64>) -> SVMVARResult<()> {
    match omega_t.iter().position(|&w| w.is_nan() || w <= 0.0) {
        Some(index) => Err(SVMVARError::NonPositiveVariance { index, value: omega_t[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Closed-form values for identity and non-trivial impact matrices.
    // - Error paths: non-positive variance, singular B0⁻¹, length mismatch.
    // - Sample sums from a start index.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Zero residual, unit variances and identity impact give −n/2 ln 2π.
    //
    // Given
    // -----
    // - n = 3, y_t = μ_t = 0, Ω_t = 1, B0⁻¹ = I.
    //
    // Expect
    // ------
    // - ℓ = −1.5 ln(2π).
    fn contribution_matches_closed_form_at_zero_residual() {
        let zero = Array1::<f64>::zeros(3);
        let ones = Array1::<f64>::ones(3);
        let b0_inv = Array2::<f64>::eye(3);

        let ll = log_likelihood_contribution(zero.view(), zero.view(), b0_inv.view(), ones.view())
            .unwrap();

        assert_relative_eq!(ll, -1.5 * (2.0 * PI).ln(), epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Structural residuals use B0 = (B0⁻¹)⁻¹ and the Jacobian term
    // ln|det B0|.
    //
    // Given
    // -----
    // - n = 2, B0⁻¹ = [[2, 0], [1, 1]] (so B0 = [[0.5, 0], [−0.5, 1]],
    //   det B0 = 0.5), y − μ = [2, 3], Ω = [1, 4].
    //
    // Expect
    // ------
    // - ε = [1, 2]; ℓ = −ln 2π − ½ ln 4 + ln 0.5 − ½ (1 + 1).
    fn contribution_applies_impact_and_jacobian() {
        let y = array![2.5, 3.0];
        let mu = array![0.5, 0.0];
        let omega = array![1.0, 4.0];
        let b0_inv = array![[2.0, 0.0], [1.0, 1.0]];

        let ll = log_likelihood_contribution(y.view(), mu.view(), b0_inv.view(), omega.view())
            .unwrap();

        let expected = -(2.0 * PI).ln() - 0.5 * 4.0_f64.ln() + 0.5_f64.ln() - 1.0;
        assert_relative_eq!(ll, expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Invalid variances, singular impact and length mismatches fail.
    //
    // Given
    // -----
    // - Ω with a zero; Ω with NaN; B0⁻¹ = [[1, 1], [1, 1]]; μ of length 3.
    //
    // Expect
    // ------
    // - `NonPositiveVariance { index: 1 }` (twice), `SingularImpactMatrix`,
    //   `LengthMismatch`.
    fn contribution_rejects_invalid_inputs() {
        let y = array![0.0, 0.0];
        let eye = Array2::<f64>::eye(2);
        let singular = array![[1.0, 1.0], [1.0, 1.0]];
        let ok_omega = array![1.0, 1.0];

        let zero_var =
            log_likelihood_contribution(y.view(), y.view(), eye.view(), array![1.0, 0.0].view());
        let nan_var = log_likelihood_contribution(
            y.view(),
            y.view(),
            eye.view(),
            array![1.0, f64::NAN].view(),
        );
        let sing = log_likelihood_contribution(y.view(), y.view(), singular.view(), ok_omega.view());
        let short = log_likelihood_contribution(
            y.view(),
            array![0.0, 0.0, 0.0].view(),
            eye.view(),
            ok_omega.view(),
        );

        assert_eq!(zero_var, Err(SVMVARError::NonPositiveVariance { index: 1, value: 0.0 }));
        assert!(matches!(nan_var, Err(SVMVARError::NonPositiveVariance { index: 1, .. })));
        assert!(matches!(sing, Err(SVMVARError::SingularImpactMatrix { .. })));
        assert!(matches!(short, Err(SVMVARError::LengthMismatch { name: "mu_t", .. })));
    }

    #[test]
    // Purpose
    // -------
    // Sample log-likelihood sums contributions from `start` and skips
    // invalid variances in unscored periods.
    //
    // Given
    // -----
    // - T = 3, n = 1, y = [9, 1, 2], μ = 0, Ω = [−1, 1, 4], start = 1.
    //
    // Expect
    // ------
    // - Sum of the t = 1 and t = 2 scalar Gaussian log-densities; an
    //   out-of-range start yields 0.
    fn sample_loglik_sums_from_start() {
        let y = array![[9.0], [1.0], [2.0]];
        let mu = Array2::<f64>::zeros((3, 1));
        let omega = array![[-1.0], [1.0], [4.0]];
        let eye = Array2::<f64>::eye(1);

        let total = log_likelihood(y.view(), mu.view(), eye.view(), omega.view(), 1).unwrap();
        let empty = log_likelihood(y.view(), mu.view(), eye.view(), omega.view(), 5).unwrap();

        let l1 = -0.5 * (2.0 * PI).ln() - 0.5;
        let l2 = -0.5 * (2.0 * PI).ln() - 0.5 * 4.0_f64.ln() - 0.5;
        assert_relative_eq!(total, l1 + l2, epsilon = 1e-12);
        assert_eq!(empty, 0.0);
    }
}
