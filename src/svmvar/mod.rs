//! svmvar: order-invariant stochastic-volatility-in-mean VAR equations.
//!
//! Purpose
//! -------
//! Provide the structural equations of the OI-SVMVAR: a VAR whose
//! conditional mean loads on two common log-volatility factors (macro and
//! financial), whose shock variances combine those factors with
//! idiosyncratic AR(1) log-volatilities, and whose "unclassified" series
//! switch, period by period, between the two factors.
//!
//! Key behaviors
//! -------------
//! - Validated containers for data, shape and every coefficient block
//!   (see [`core`]).
//! - Engines for the two conditional means, the volatility decomposition,
//!   the idiosyncratic process and the structural likelihood.
//! - [`SVMVARModel`] to score a complete draw over a full sample.
//! - A single error type, [`SVMVARError`], with the
//!   Dimension / Parameter / Numerical taxonomy of [`ErrorKind`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Data arrive standardized and in `[macro] + [unclassified] + [financial]`
//!   column order; this module does not transform or reorder series.
//! - No estimation happens here: coefficients and latent states are
//!   supplied by an external sampler or optimizer.
//!
//! Conventions
//! -----------
//! - Time runs down the rows of every T×k matrix; the classification path
//!   is the exception (nu×T, series in rows).
//! - Lag order names: `p` (VAR), `q` (volatility-in-mean), `ph`/`py`
//!   (common-factor equation).
//!
//! Downstream usage
//! ----------------
//! - A sampler builds an [`SVMVARShape`] and an [`ObservationMatrix`] once,
//!   then for every draw assembles [`SVMVARParams`] and a [`LatentState`]
//!   and calls [`SVMVARModel::log_likelihood`], combining it with prior
//!   log-densities from [`crate::priors`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each engine; `tests/` exercises the pipeline
//!   end to end.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ClassificationPath, ContemporaneousImpact, GroupSizes, HEquationCoefficients,
    IdiosyncraticAR1, ObservationMatrix, Regime, SVMVARShape, TotalLogVolatility,
    VARCoefficients, VariableGroup, VolInMeanCoefficients,
};

pub use self::errors::{ErrorKind, SVMVARError, SVMVARResult};

pub use self::models::{LatentState, SVMVARModel, SVMVARParams};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use oi_svmvar::svmvar::prelude::*;
//
// to import the model surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::{ErrorKind, LatentState, SVMVARError, SVMVARModel, SVMVARParams, SVMVARResult};
}
