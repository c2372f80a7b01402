//! core: OI-SVMVAR data, coefficient blocks and structural equations.
//!
//! Purpose
//! -------
//! Collect the building blocks of the order-invariant stochastic-volatility-
//! in-mean VAR: model shape, validated observation and coefficient
//! containers, the lag builder, the two conditional-mean equations, the
//! time-varying volatility decomposition, the idiosyncratic AR(1) process
//! and the structural likelihood. [`crate::svmvar::models`] composes these
//! into full-sample scoring of one parameter draw.
//!
//! Key behaviors
//! -------------
//! - Describe the model with [`GroupSizes`] and [`SVMVARShape`], and hold
//!   data in an [`ObservationMatrix`].
//! - Validate coefficient blocks once ([`VARCoefficients`],
//!   [`VolInMeanCoefficients`], [`HEquationCoefficients`],
//!   [`ContemporaneousImpact`]).
//! - Evaluate `μ_t` and `h̄_t` ([`var_mean`], [`h_mean`]) on top of
//!   [`build_lags`].
//! - Combine idiosyncratic and common log-volatilities through a dense
//!   [`ClassificationPath`] ([`decompose_volatility`]).
//! - Simulate and score [`IdiosyncraticAR1`] paths.
//! - Score observations with [`log_likelihood_contribution`] and
//!   [`log_likelihood`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Observation columns are ordered `[macro] + [unclassified] + [financial]`
//!   everywhere: data, variances, coefficient rows.
//! - The common-factor matrix `h` is T×2 with column 0 = macro and
//!   column 1 = financial.
//! - Lag slot `ℓ` is the `(ℓ + 1)`-period lag in every consumer.
//! - Periods before a burn-in threshold have zero conditional mean; they are
//!   never back-filled.
//!
//! Conventions
//! -----------
//! - All functions are pure and stateless; the only randomness is the
//!   caller-owned RNG passed to [`IdiosyncraticAR1::simulate`].
//! - Failures are reported as [`SVMVARError`](crate::svmvar::errors::SVMVARError)
//!   and classified by `kind()`; nothing here logs.
//!
//! Testing notes
//! -------------
//! - Each submodule has unit tests for its identities and error paths; the
//!   integration test under `tests/` runs the full pipeline from data to
//!   likelihood, priors and diagnostics.

pub mod classification;
pub mod data;
pub mod idiosyncratic;
pub mod lags;
pub mod likelihood;
pub mod mean;
pub mod params;
pub mod shape;
pub mod validation;
pub mod volatility;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::classification::{ClassificationPath, Regime};
pub use self::data::ObservationMatrix;
pub use self::idiosyncratic::IdiosyncraticAR1;
pub use self::lags::build_lags;
pub use self::likelihood::{log_likelihood, log_likelihood_contribution, log_likelihood_contributions};
pub use self::mean::{h_mean, var_mean};
pub use self::params::{
    ContemporaneousImpact, HEquationCoefficients, VARCoefficients, VolInMeanCoefficients,
};
pub use self::shape::{GroupSizes, SVMVARShape, VariableGroup};
pub use self::volatility::{TotalLogVolatility, decompose_volatility};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::classification::{ClassificationPath, Regime};
    pub use super::data::ObservationMatrix;
    pub use super::idiosyncratic::IdiosyncraticAR1;
    pub use super::lags::build_lags;
    pub use super::likelihood::{log_likelihood, log_likelihood_contribution};
    pub use super::mean::{h_mean, var_mean};
    pub use super::params::{
        ContemporaneousImpact, HEquationCoefficients, VARCoefficients, VolInMeanCoefficients,
    };
    pub use super::shape::{GroupSizes, SVMVARShape, VariableGroup};
    pub use super::volatility::{TotalLogVolatility, decompose_volatility};
}
