//! diagnostics: convergence and summary tools for MCMC output.
//!
//! Purpose
//! -------
//! Assess chains of accepted OI-SVMVAR draws produced by an external
//! sampler: serial dependence, convergence between early and late parts of
//! the chain, effective sample size, and tabular posterior summaries.
//!
//! Key behaviors
//! -------------
//! - [`autocorrelation`] returns the sample ACF at lags `0..=max_lag`.
//! - [`geweke`] returns a [`GewekeOutcome`] with z-score and p-value.
//! - [`effective_sample_size`] truncates the ACF sum at the first small
//!   autocorrelation.
//! - [`summarize_draws`] builds a [`PosteriorSummary`] table.
//!
//! Invariants & assumptions
//! ------------------------
//! - Chains are plain `&[f64]` in iteration order; draw matrices are
//!   `n_draws × n_params`.
//! - All failures are [`DiagnosticsError`] values.

pub mod autocorrelation;
pub mod convergence;
pub mod errors;
pub mod summary;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::autocorrelation::autocorrelation;
pub use self::convergence::{
    ESS_MAX_LAG, GEWEKE_FIRST, GEWEKE_LAST, GewekeOutcome, effective_sample_size, geweke,
};
pub use self::errors::{DiagnosticsError, DiagnosticsResult};
pub use self::summary::{DEFAULT_QUANTILES, PosteriorSummary, SummaryRow, summarize_draws};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::autocorrelation::autocorrelation;
    pub use super::convergence::{GewekeOutcome, effective_sample_size, geweke};
    pub use super::errors::{DiagnosticsError, DiagnosticsResult};
    pub use super::summary::{PosteriorSummary, SummaryRow, summarize_draws};
}
