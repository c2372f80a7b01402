//! Errors for the OI-SVMVAR core (shape checks, parameter validity, and
//! numerical failures in the likelihood).
//!
//! This module defines the model error type, [`SVMVARError`], its result
//! alias [`SVMVARResult`], and the coarse taxonomy [`ErrorKind`] that callers
//! use to decide whether a failure means "fix your shapes", "reject this
//! draw", or "repair the matrix".
//!
//! ## Conventions
//! - **Indices are 0-based.** `t` indexes time (rows), `i`/`col` index
//!   variables (columns).
//! - Shape pairs are reported as `(rows, cols)`.
//! - Linear-algebra failures are wrapped as [`SVMVARError::Linalg`] and keep
//!   the kind assigned by [`LinalgError::kind`].
use crate::{linalg::errors::LinalgError, svmvar::core::shape::GroupSizes};

/// Crate-wide result alias for operations that may produce [`SVMVARError`].
pub type SVMVARResult<T> = Result<T, SVMVARError>;

/// Error taxonomy shared by every error type in the crate.
///
/// - `Dimension`: a coefficient or data shape disagrees with the model
///   configuration. Always fatal; retrying without fixing shapes is useless.
/// - `Parameter`: an invalid draw or hyperparameter (non-stationary AR(1),
///   non-positive scale, unknown regime code). The caller should reject or
///   re-propose.
/// - `Numerical`: singular impact matrix or non-positive variances reaching
///   the likelihood. Covariance problems are recoverable through
///   [`crate::linalg::nearest_positive_definite`]; a singular impact matrix is
///   not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Dimension,
    Parameter,
    Numerical,
}

/// Unified error type for the OI-SVMVAR equations and priors.
#[derive(Debug, Clone, PartialEq)]
pub enum SVMVARError {
    // ---- Dimension ----
    /// All three variable groups are empty.
    EmptyModel,

    /// Observation matrix width does not equal `nm + nu + nf`.
    ColumnCountMismatch { expected: usize, actual: usize },

    /// Same total width, but the observations were split into different
    /// macro / unclassified / financial groups than the model expects.
    GroupSizeMismatch { expected: GroupSizes, actual: GroupSizes },

    /// Number of variable names does not equal the number of columns.
    NameCountMismatch { expected: usize, actual: usize },

    /// A coefficient matrix in a block has the wrong shape.
    CoefficientShape {
        block: &'static str,
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A coefficient block that needs at least one matrix is empty.
    EmptyCoefficients { block: &'static str },

    /// A data or state matrix has the wrong shape.
    SeriesShape { name: &'static str, expected: (usize, usize), actual: (usize, usize) },

    /// A vector argument has the wrong length.
    LengthMismatch { name: &'static str, expected: usize, actual: usize },

    /// A lag order is not admissible for the model.
    InvalidLagOrder { name: &'static str, value: usize, reason: &'static str },

    // ---- Parameter ----
    /// An entry of the named matrix (observations, a coefficient block or the
    /// `B0` parameters) is NaN/±inf.
    NonFiniteData { name: &'static str, row: usize, col: usize, value: f64 },

    /// A location-type scalar parameter is NaN/±inf.
    NonFiniteParameter { name: &'static str, value: f64 },

    /// AR(1) coefficient violates |ρ| < 1.
    NonStationaryAR1 { rho: f64 },

    /// A scale/variance-type parameter must be finite and > 0.
    NonPositiveScale { name: &'static str, value: f64 },

    /// A probability must lie in [0, 1].
    InvalidProbability { name: &'static str, value: f64 },

    /// A classification code other than 0 (macro) or 1 (financial).
    UnknownRegimeCode { series: usize, t: usize, code: i64 },

    /// A prior hyperparameter is rejected by the distribution it feeds.
    InvalidHyperparameter { name: &'static str, value: f64, reason: &'static str },

    // ---- Numerical ----
    /// A diagonal variance reaching the likelihood is ≤ 0 or NaN.
    NonPositiveVariance { index: usize, value: f64 },

    /// `|det(B0⁻¹)|` fell below the singularity tolerance.
    SingularImpactMatrix { determinant: f64 },

    // ---- Linear algebra ----
    /// Failure raised by the `linalg` utilities.
    Linalg(LinalgError),
}

impl SVMVARError {
    /// Map the variant onto the Dimension / Parameter / Numerical taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SVMVARError::EmptyModel
            | SVMVARError::ColumnCountMismatch { .. }
            | SVMVARError::GroupSizeMismatch { .. }
            | SVMVARError::NameCountMismatch { .. }
            | SVMVARError::CoefficientShape { .. }
            | SVMVARError::EmptyCoefficients { .. }
            | SVMVARError::SeriesShape { .. }
            | SVMVARError::LengthMismatch { .. }
            | SVMVARError::InvalidLagOrder { .. } => ErrorKind::Dimension,
            SVMVARError::NonFiniteData { .. }
            | SVMVARError::NonFiniteParameter { .. }
            | SVMVARError::NonStationaryAR1 { .. }
            | SVMVARError::NonPositiveScale { .. }
            | SVMVARError::InvalidProbability { .. }
            | SVMVARError::UnknownRegimeCode { .. }
            | SVMVARError::InvalidHyperparameter { .. } => ErrorKind::Parameter,
            SVMVARError::NonPositiveVariance { .. } | SVMVARError::SingularImpactMatrix { .. } => {
                ErrorKind::Numerical
            }
            SVMVARError::Linalg(err) => err.kind(),
        }
    }
}

impl std::error::Error for SVMVARError {}

impl std::fmt::Display for SVMVARError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dimension ----
            SVMVARError::EmptyModel => {
                write!(f, "Model must contain at least one variable (nm + nu + nf > 0)")
            }
            SVMVARError::ColumnCountMismatch { expected, actual } => {
                write!(f, "Observation matrix must have nm + nu + nf = {expected} columns; got {actual}")
            }
            SVMVARError::GroupSizeMismatch { expected, actual } => write!(
                f,
                "Group sizes (nm, nu, nf) must be ({}, {}, {}); got ({}, {}, {})",
                expected.nm, expected.nu, expected.nf, actual.nm, actual.nu, actual.nf
            ),
            SVMVARError::NameCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} variable names; got {actual}")
            }
            SVMVARError::CoefficientShape { block, index, expected, actual } => {
                write!(
                    f,
                    "Coefficient matrix {block}[{index}] must be {}x{}; got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            SVMVARError::EmptyCoefficients { block } => {
                write!(f, "Coefficient block {block} must contain at least one matrix")
            }
            SVMVARError::SeriesShape { name, expected, actual } => {
                write!(
                    f,
                    "{name} must be {}x{}; got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            SVMVARError::LengthMismatch { name, expected, actual } => {
                write!(f, "{name} must have length {expected}; got {actual}")
            }
            SVMVARError::InvalidLagOrder { name, value, reason } => {
                write!(f, "Invalid lag order {name} = {value}: {reason}")
            }
            // ---- Parameter ----
            SVMVARError::NonFiniteData { name, row, col, value } => {
                write!(f, "{name} entry at (row = {row}, col = {col}) is non-finite: {value}")
            }
            SVMVARError::NonFiniteParameter { name, value } => {
                write!(f, "{name} must be finite; got {value}")
            }
            SVMVARError::NonStationaryAR1 { rho } => {
                write!(f, "AR(1) coefficient must satisfy |rho| < 1; got {rho}")
            }
            SVMVARError::NonPositiveScale { name, value } => {
                write!(f, "{name} must be finite and > 0; got {value}")
            }
            SVMVARError::InvalidProbability { name, value } => {
                write!(f, "{name} must be a probability in [0, 1]; got {value}")
            }
            SVMVARError::UnknownRegimeCode { series, t, code } => {
                write!(
                    f,
                    "Unknown classification code {code} for series {series} at t = {t} (expected 0 or 1)"
                )
            }
            SVMVARError::InvalidHyperparameter { name, value, reason } => {
                write!(f, "Invalid prior hyperparameter {name} = {value}: {reason}")
            }
            // ---- Numerical ----
            SVMVARError::NonPositiveVariance { index, value } => {
                write!(f, "Variance at index {index} must be > 0; got {value}")
            }
            SVMVARError::SingularImpactMatrix { determinant } => {
                write!(f, "Impact matrix inverse is singular (determinant {determinant:e})")
            }
            // ---- Linear algebra ----
            SVMVARError::Linalg(err) => write!(f, "{err}"),
        }
    }
}

impl From<LinalgError> for SVMVARError {
    fn from(err: LinalgError) -> SVMVARError {
        SVMVARError::Linalg(err)
    }
}
