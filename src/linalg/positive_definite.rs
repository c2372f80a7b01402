//! linalg::positive_definite: PD check and nearest-PD repair.
//!
//! Purpose
//! -------
//! Decide whether a covariance-type matrix can be Cholesky-factorized and,
//! when it cannot, project it onto a nearby positive-definite matrix so a
//! sampler can continue with a repaired draw instead of aborting.
//!
//! Key behaviors
//! -------------
//! - [`is_positive_definite`] attempts a Cholesky factorization and falls
//!   back to the sign of the symmetric eigenvalues with tolerance
//!   [`PD_TOL`].
//! - [`nearest_positive_definite`] applies Higham's construction:
//!   symmetrize, add the SVD polar factor, re-symmetrize, then nudge the
//!   diagonal with a growing `k²` step until the PD check passes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs must be square and finite; anything else is reported as a
//!   [`LinalgError`] rather than silently coerced.
//! - Only the symmetric part of the input influences the repaired result.
//!
//! Conventions
//! -----------
//! - The diagonal nudge at step `k` is
//!   `(PD_TOL − λ_min)⁺ · k² + spacing(‖A‖_F)`, so the smallest eigenvalue
//!   is lifted just past the tolerance the eigenvalue fallback uses.
//! - Iterations are capped at [`MAX_REPAIR_ITER`].
use crate::{
    linalg::{
        convert::{from_dmatrix, to_dmatrix},
        errors::{LinalgError, LinalgResult},
    },
    numerical_stability::transformations::{MAX_REPAIR_ITER, PD_TOL, ulp},
};
use log::{debug, warn};
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Check whether a square matrix is positive definite.
///
/// Parameters
/// ----------
/// - `a`: `ArrayView2<f64>`
///   Square matrix. Only its lower triangle is read by the Cholesky
///   attempt and by the eigenvalue fallback.
///
/// Returns
/// -------
/// `LinalgResult<bool>`
///   `Ok(true)` when Cholesky succeeds or, failing that, when every
///   symmetric eigenvalue exceeds [`PD_TOL`].
///
/// Errors
/// ------
/// - `LinalgError::NotSquare` for non-square input.
/// - `LinalgError::NonFinite` if any entry is NaN/±inf.
pub fn is_positive_definite(a: ArrayView2<f64>) -> LinalgResult<bool> {
    validate_square_finite(a, "positive-definiteness check")?;
    Ok(is_pd_dmatrix(&to_dmatrix(a)))
}

/// Nearest positive-definite matrix (Higham, 1988).
///
/// Parameters
/// ----------
/// - `a`: `ArrayView2<f64>`
///   Square, finite matrix, typically a covariance estimate that lost
///   definiteness through rounding or an indefinite proposal.
///
/// Returns
/// -------
/// `LinalgResult<Array2<f64>>`
///   A symmetric matrix that passes [`is_positive_definite`]. If the
///   symmetrized polar average is already PD it is returned without any
///   diagonal shift.
///
/// Errors
/// ------
/// - `LinalgError::NotSquare` / `LinalgError::NonFinite` on invalid input.
/// - `LinalgError::RepairDidNotConverge` if the check still fails after
///   [`MAX_REPAIR_ITER`] nudges.
///
/// Notes
/// -----
/// - For a symmetric input with eigen-decomposition `V Λ Vᵀ`, the polar
///   average equals `V max(Λ, 0) Vᵀ`; the result therefore differs from the
///   input by the negative eigen-parts plus a diagonal shift of order
///   `PD_TOL`.
pub fn nearest_positive_definite(a: ArrayView2<f64>) -> LinalgResult<Array2<f64>> {
    validate_square_finite(a, "nearest positive-definite repair")?;
    let n = a.nrows();
    if n == 0 {
        return Ok(Array2::zeros((0, 0)));
    }

    let m = to_dmatrix(a);
    let b = (&m + m.transpose()) * 0.5;
    let svd = b.clone().svd(false, true);
    let v_t = svd.v_t.ok_or(LinalgError::NonFinite { context: "SVD right singular vectors" })?;
    let h = v_t.transpose() * DMatrix::from_diagonal(&svd.singular_values) * &v_t;
    let a2 = (&b + &h) * 0.5;
    let mut a3 = (&a2 + a2.transpose()) * 0.5;

    if is_pd_dmatrix(&a3) {
        return Ok(from_dmatrix(&a3));
    }

    let spacing = ulp(m.norm());
    let mut min_eig = min_symmetric_eigenvalue(&a3);
    for k in 1..=MAX_REPAIR_ITER {
        let step = (k * k) as f64;
        let shift = (PD_TOL - min_eig).max(0.0) * step + spacing;
        for i in 0..n {
            a3[(i, i)] += shift;
        }
        debug!("nearest-PD repair: iteration {k}, min eigenvalue {min_eig:e}, shift {shift:e}");
        if is_pd_dmatrix(&a3) {
            return Ok(from_dmatrix(&a3));
        }
        min_eig = min_symmetric_eigenvalue(&a3);
    }

    warn!(
        "nearest-PD repair did not converge after {MAX_REPAIR_ITER} iterations \
         (min eigenvalue {min_eig:e})"
    );
    Err(LinalgError::RepairDidNotConverge { iterations: MAX_REPAIR_ITER, min_eigenvalue: min_eig })
}

// ---- Helper methods ----

pub(crate) fn is_pd_dmatrix(m: &DMatrix<f64>) -> bool {
    if m.clone().cholesky().is_some() {
        return true;
    }
    m.symmetric_eigenvalues().iter().all(|&lambda| lambda > PD_TOL)
}

fn min_symmetric_eigenvalue(m: &DMatrix<f64>) -> f64 {
    m.symmetric_eigenvalues().iter().copied().fold(f64::INFINITY, f64::min)
}

fn validate_square_finite(a: ArrayView2<f64>, context: &'static str) -> LinalgResult<()> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite { context });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Cholesky / eigenvalue PD decision on definite, indefinite and
    //   singular inputs.
    // - Nearest-PD repair: already-PD inputs are unchanged, indefinite inputs
    //   are repaired with no more than the minimal eigen-shift.
    // - Shape and finiteness guards.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A symmetric PD matrix passes the check.
    //
    // Given
    // -----
    // - A = [[4, 1], [1, 3]].
    //
    // Expect
    // ------
    // - `Ok(true)`.
    fn is_positive_definite_accepts_pd_matrix() {
        let a = array![[4.0, 1.0], [1.0, 3.0]];

        assert_eq!(is_positive_definite(a.view()), Ok(true));
    }

    #[test]
    // Purpose
    // -------
    // Indefinite and singular PSD matrices fail the check.
    //
    // Given
    // -----
    // - [[1, 2], [2, 1]] with eigenvalues {3, −1}.
    // - [[1, 1], [1, 1]] with eigenvalues {2, 0}.
    //
    // Expect
    // ------
    // - `Ok(false)` for both.
    fn is_positive_definite_rejects_indefinite_and_singular() {
        let indefinite = array![[1.0, 2.0], [2.0, 1.0]];
        let singular = array![[1.0, 1.0], [1.0, 1.0]];

        assert_eq!(is_positive_definite(indefinite.view()), Ok(false));
        assert_eq!(is_positive_definite(singular.view()), Ok(false));
    }

    #[test]
    // Purpose
    // -------
    // Shape and finiteness guards surface as errors.
    //
    // Given
    // -----
    // - A 2×3 matrix and a 2×2 matrix containing NaN.
    //
    // Expect
    // ------
    // - `NotSquare` and `NonFinite` respectively.
    fn is_positive_definite_rejects_invalid_input() {
        let rect = Array2::<f64>::zeros((2, 3));
        let nan = array![[1.0, f64::NAN], [0.0, 1.0]];

        assert_eq!(
            is_positive_definite(rect.view()),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );
        assert!(matches!(is_positive_definite(nan.view()), Err(LinalgError::NonFinite { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A matrix that is already PD comes back unchanged.
    //
    // Given
    // -----
    // - A = [[4, 1], [1, 3]].
    //
    // Expect
    // ------
    // - Output equals A up to floating-point noise.
    fn nearest_positive_definite_keeps_pd_input() {
        let a = array![[4.0, 1.0], [1.0, 3.0]];

        let repaired = nearest_positive_definite(a.view()).unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(repaired[[i, j]], a[[i, j]], epsilon = 1e-10);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A symmetric matrix with one negative eigenvalue is repaired into a PD
    // matrix that moves no further than the minimal eigen-shift.
    //
    // Given
    // -----
    // - A = [[1, 2], [2, 1]], λ_min = −1.
    // - A = diag(2, −0.5, 1), λ_min = −0.5.
    //
    // Expect
    // ------
    // - Output passes `is_positive_definite`.
    // - max |X − A| ≤ |λ_min| + 1e-6.
    fn nearest_positive_definite_repairs_with_minimal_shift() {
        let cases = [
            (array![[1.0, 2.0], [2.0, 1.0]], 1.0),
            (array![[2.0, 0.0, 0.0], [0.0, -0.5, 0.0], [0.0, 0.0, 1.0]], 0.5),
        ];

        for (a, lambda_abs) in cases {
            let repaired = nearest_positive_definite(a.view()).unwrap();

            assert_eq!(is_positive_definite(repaired.view()), Ok(true));
            let max_diff =
                (&repaired - &a).iter().map(|v| v.abs()).fold(0.0_f64, f64::max);
            assert!(
                max_diff <= lambda_abs + 1e-6,
                "repair moved {max_diff} > minimal shift {lambda_abs}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // The repaired matrix is symmetric even for a non-symmetric input.
    //
    // Given
    // -----
    // - A = [[1, 3], [1, 1]] (symmetric part [[1, 2], [2, 1]]).
    //
    // Expect
    // ------
    // - X[0,1] == X[1,0] and X is PD.
    fn nearest_positive_definite_symmetrizes() {
        let a = array![[1.0, 3.0], [1.0, 1.0]];

        let repaired = nearest_positive_definite(a.view()).unwrap();

        assert_relative_eq!(repaired[[0, 1]], repaired[[1, 0]], epsilon = 1e-12);
        assert_eq!(is_positive_definite(repaired.view()), Ok(true));
    }
}
