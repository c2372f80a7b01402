//! Validation helpers: reusable shape and value checks for the SVMVAR core.
//!
//! Purpose
//! -------
//! Centralize the small checks that constructors and engine functions run at
//! their boundaries, so each failure is reported with the same structured
//! [`SVMVARError`] variant wherever it is detected.
//!
//! Key behaviors
//! -------------
//! - Matrix shape checks for data/state matrices and for every matrix in a
//!   coefficient block.
//! - Finiteness checks that report the first offending `(row, col)`.
//! - Scalar checks for scales, probabilities and AR(1) coefficients.
//!
//! Conventions
//! -----------
//! - Every helper returns [`SVMVARResult`] and never panics on bad input.
//! - Scalar helpers return the validated value on success so they can be
//!   used inline in constructors.
//! - No logging; callers decide whether a rejection is worth surfacing.
use crate::svmvar::errors::{SVMVARError, SVMVARResult};
use ndarray::{Array2, ArrayView2};

/// Require `a` to have exactly the `expected` `(rows, cols)` shape.
///
/// # Errors
/// [`SVMVARError::SeriesShape`] carrying `name` and both shapes.
pub fn validate_matrix_shape(
    name: &'static str, a: ArrayView2<f64>, expected: (usize, usize),
) -> SVMVARResult<()> {
    if a.dim() != expected {
        return Err(SVMVARError::SeriesShape { name, expected, actual: a.dim() });
    }
    Ok(())
}

/// Require every matrix of a coefficient block to have the same shape.
///
/// Parameters
/// ----------
/// - `block`: `&'static str`
///   Block label used in the error (e.g. `"B"`, `"A"`, `"Phi"`).
/// - `matrices`: `&[Array2<f64>]`
///   Coefficient matrices in lag order.
/// - `expected`: `(usize, usize)`
///   Required shape of each matrix.
///
/// Returns
/// -------
/// `SVMVARResult<()>`
///
/// Errors
/// ------
/// - `SVMVARError::CoefficientShape` for the first mismatching matrix, with
///   its 0-based position in `matrices`.
/// - `SVMVARError::NonFiniteData` if a coefficient is NaN/±inf.
///
/// Notes
/// -----
/// - An empty slice passes; blocks that need at least one matrix check that
///   separately.
pub fn validate_coefficient_block(
    block: &'static str, matrices: &[Array2<f64>], expected: (usize, usize),
) -> SVMVARResult<()> {
    for (index, m) in matrices.iter().enumerate() {
        if m.dim() != expected {
            return Err(SVMVARError::CoefficientShape {
                block,
                index,
                expected,
                actual: m.dim(),
            });
        }
        validate_finite(block, m.view())?;
    }
    Ok(())
}

/// Require every entry of `a` to be finite.
///
/// # Errors
/// [`SVMVARError::NonFiniteData`] tagged with `name` and the first offending
/// `(row, col)` in row-major order.
pub fn validate_finite(name: &'static str, a: ArrayView2<f64>) -> SVMVARResult<()> {
    match a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(SVMVARError::NonFiniteData { name, row, col, value }),
        None => Ok(()),
    }
}

/// Require a scale-type parameter to be finite and strictly positive.
pub fn validate_positive_scale(name: &'static str, value: f64) -> SVMVARResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SVMVARError::NonPositiveScale { name, value });
    }
    Ok(value)
}

/// Require a probability in `[0, 1]` (NaN rejected).
pub fn validate_probability(name: &'static str, value: f64) -> SVMVARResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SVMVARError::InvalidProbability { name, value });
    }
    Ok(value)
}

/// Require a finite AR(1) coefficient with `|ρ| < 1`.
pub fn validate_ar1_coefficient(rho: f64) -> SVMVARResult<f64> {
    if !rho.is_finite() || rho.abs() >= 1.0 {
        return Err(SVMVARError::NonStationaryAR1 { rho });
    }
    Ok(rho)
}

/// Require a vector-like argument to have the `expected` length.
pub fn validate_length(name: &'static str, actual: usize, expected: usize) -> SVMVARResult<()> {
    if actual != expected {
        return Err(SVMVARError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}
