//! numerical_stability: shared tolerances and guarded scalar transforms.
//!
//! Purpose
//! -------
//! Centralize the small numerical constants and clipped transforms that the
//! volatility, likelihood and linear-algebra layers rely on, so that every
//! consumer applies the same guards.
//!
//! Key behaviors
//! -------------
//! - Provide `safe_exp` (clipped to `[-20, 20]`) for turning total
//!   log-volatilities into variances.
//! - Provide `safe_ln` (floored at `LOG_FLOOR`) for the inverse direction.
//! - Expose `PD_TOL`, `SINGULAR_TOL` and `MAX_REPAIR_ITER` for the
//!   positive-definiteness check, the impact-matrix singularity check and
//!   the nearest-PD repair loop.
//!
//! Conventions
//! -----------
//! - Pure scalar helpers; no logging, no I/O, no allocation.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EXP_CLIP, LOG_FLOOR, MAX_REPAIR_ITER, PD_TOL, SINGULAR_TOL, safe_exp, safe_ln, ulp,
};
