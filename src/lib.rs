//! oi_svmvar: equations, priors and diagnostics for order-invariant
//! stochastic-volatility-in-mean VARs.
//!
//! Purpose
//! -------
//! Provide the mathematical core of the OI-SVMVAR model: a structural VAR
//! whose reduced-form shocks have time-varying volatility driven by a
//! macro and a financial common log-volatility factor, with each
//! unclassified series assigned to one of the two factors period by
//! period. The crate exposes the primitives a posterior sampler calls; it
//! does not run a sampler itself.
//!
//! Key behaviors
//! -------------
//! - `svmvar`: lag construction, conditional means of the observation and
//!   common-factor equations, volatility decomposition, the idiosyncratic
//!   AR(1) process and the structural Gaussian log-likelihood, tied
//!   together by [`svmvar::SVMVARModel`].
//! - `priors`: [`priors::PriorConfig`] hyperparameters, the Minnesota and
//!   block priors built by [`priors::PriorBuilder`], and prior
//!   log-densities.
//! - `linalg`: positive-definiteness check and nearest-PD repair,
//!   vec/unvec/Kronecker, companion form, stationarity, impulse responses
//!   and a least-squares VAR fit.
//! - `diagnostics`: autocorrelation, Geweke, effective sample size and
//!   posterior summary tables for chains of draws.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are a standardized T×n matrix with columns ordered
//!   macro, unclassified, financial.
//! - Every computation is a pure function of its arguments; the only
//!   randomness is the AR(1) simulator, which borrows a caller-owned RNG.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray` arrays indexed `(row, col)` with time down the
//!   rows; `nalgebra` is used internally for factorizations.
//! - Each top-level module has its own error type; `linalg` errors convert
//!   into [`svmvar::SVMVARError`].
//! - Events worth surfacing (PD repairs, OLS fits, prior construction,
//!   stationarity checks) go through the `log` facade. No logger is
//!   installed by the library.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code in each module; an end-to-end test
//!   in `tests/` runs OLS → prior → likelihood → stability → diagnostics on
//!   simulated data.

pub mod diagnostics;
pub mod linalg;
pub mod numerical_stability;
pub mod priors;
pub mod svmvar;
