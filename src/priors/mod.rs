//! priors: OI-SVMVAR prior hyperparameters, blocks and builder.
//!
//! Purpose
//! -------
//! Specify the prior a Gibbs/Metropolis sampler for the OI-SVMVAR model
//! draws against: a Minnesota prior on the VAR lags, shrinkage priors on
//! the volatility-in-mean, impact and common-factor coefficients, Normal /
//! Inverse-Gamma priors on the idiosyncratic AR(1) processes and a Markov
//! prior on the classification labels.
//!
//! Key behaviors
//! -------------
//! - [`PriorConfig`] holds every scalar hyperparameter with the reference
//!   defaults and a `validate` method.
//! - [`PriorBuilder`] expands a config into a [`PriorSpecification`] for a
//!   given [`crate::svmvar::SVMVARShape`] and OLS residual scales.
//! - Each block record carries a `log_density` for the draws it governs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Block shapes match the stacked layouts of the coefficient containers
//!   in `svmvar::core::params`.
//! - Errors are reported as [`crate::svmvar::SVMVARError`].
//!
//! Downstream usage
//! ----------------
//! - Fit [`crate::linalg::ols_var`], pass `residual_scale()` to
//!   [`PriorBuilder::build`], then score draws with
//!   [`PriorSpecification::coefficient_log_density`] and the per-block
//!   densities.

pub mod blocks;
pub mod builder;
pub mod config;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::blocks::{
    B0Block, EtaAR1Block, HEquationBlock, InitialStateBlock, TransitionBlock, VARBlock,
    VolInMeanBlock,
};
pub use self::builder::{PriorBuilder, PriorSpecification};
pub use self::config::PriorConfig;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::blocks::{
        B0Block, EtaAR1Block, HEquationBlock, InitialStateBlock, TransitionBlock, VARBlock,
        VolInMeanBlock,
    };
    pub use super::builder::{PriorBuilder, PriorSpecification};
    pub use super::config::PriorConfig;
}
