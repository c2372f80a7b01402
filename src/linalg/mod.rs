//! linalg: matrix utilities shared by the model, priors and diagnostics.
//!
//! Purpose
//! -------
//! Collect the dense linear-algebra routines a Bayesian VAR workflow needs
//! around the structural equations: covariance repair, (un)vectorization
//! for matrix-normal priors, companion-form analysis and a preliminary OLS
//! fit for prior scaling.
//!
//! Key behaviors
//! -------------
//! - Positive-definiteness: [`is_positive_definite`] and Higham's
//!   [`nearest_positive_definite`] with a bounded diagonal-nudge loop.
//! - Reshaping: [`vectorize`], [`unvectorize`] and [`kronecker`].
//! - VAR dynamics: [`companion_matrix`], [`check_stationarity`] returning a
//!   [`StationarityReport`], and [`impulse_response`].
//! - Estimation: [`ols_var`] returning an [`OlsVar`] whose
//!   [`OlsVar::residual_scale`] feeds the prior builder.
//!
//! Invariants & assumptions
//! ------------------------
//! - Public functions take `ndarray` views and return owned `ndarray`
//!   arrays; `nalgebra` is used internally for factorizations only.
//! - Every failure is a [`LinalgError`]; nothing in this module panics on
//!   user input.
//!
//! Conventions
//! -----------
//! - Matrices are indexed `(row, col)`; time runs down the rows of data
//!   matrices.
//! - `vec(·)` is column stacking.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; the crate-level integration test
//!   chains `ols_var → check_stationarity → impulse_response` on simulated
//!   data.

pub mod companion;
pub mod convert;
pub mod errors;
pub mod ols;
pub mod positive_definite;
pub mod vectorize;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::companion::{StationarityReport, check_stationarity, companion_matrix, impulse_response};
pub use self::errors::{LinalgError, LinalgResult};
pub use self::ols::{OlsVar, ols_var};
pub use self::positive_definite::{is_positive_definite, nearest_positive_definite};
pub use self::vectorize::{kronecker, unvectorize, vectorize};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::companion::{
        StationarityReport, check_stationarity, companion_matrix, impulse_response,
    };
    pub use super::errors::{LinalgError, LinalgResult};
    pub use super::ols::{OlsVar, ols_var};
    pub use super::positive_definite::{is_positive_definite, nearest_positive_definite};
    pub use super::vectorize::{kronecker, unvectorize, vectorize};
}
