//! Numerical stability utilities.
//!
//! Provides guarded versions of the scalar transforms used when moving
//! between log-volatilities and variances, together with the tolerances
//! shared by the linear-algebra and likelihood code.
//! The exponential is clipped to `[-EXP_CLIP, EXP_CLIP]` before evaluation,
//! which keeps `f64` arithmetic well away from overflow for any
//! log-variance a sampler might propose.
//!
//! # Provided items
//! - [`EXP_CLIP`]: symmetric clip bound (20.0) applied before `exp`.
//! - [`LOG_FLOOR`]: floor (1e-10) applied before `ln`.
//! - [`PD_TOL`]: eigenvalue threshold (1e-8) for the positive-definiteness
//!   fallback check.
//! - [`SINGULAR_TOL`]: determinant magnitude (1e-12) below which an impact
//!   matrix is treated as singular.
//! - [`MAX_REPAIR_ITER`]: iteration cap for the nearest-PD diagonal nudge.
//! - [`safe_exp(x)`]: `exp(clip(x, -20, 20))`.
//! - [`safe_ln(x)`]: `ln(max(x, LOG_FLOOR))`.
//! - [`ulp(x)`]: distance from `|x|` to the next representable `f64`.

/// Symmetric clip bound for log-volatilities before exponentiation.
pub const EXP_CLIP: f64 = 20.0;

/// Floor applied to strictly-positive inputs before taking logarithms.
pub const LOG_FLOOR: f64 = 1e-10;

/// Minimum eigenvalue accepted by the eigenvalue fallback of the
/// positive-definiteness check.
pub const PD_TOL: f64 = 1e-8;

/// Threshold on `|det(B0⁻¹)|` below which the impact matrix is singular.
pub const SINGULAR_TOL: f64 = 1e-12;

/// Upper bound on diagonal-nudge iterations in the nearest-PD repair.
pub const MAX_REPAIR_ITER: usize = 100;

/// Clipped exponential: `exp(clip(x, -EXP_CLIP, EXP_CLIP))`.
///
/// Used whenever total log-volatilities are turned into variances. `NaN`
/// propagates unchanged so that callers' positivity checks still fire.
///
/// # Parameters
/// - `x`: log-scale input.
///
/// # Returns
/// - `exp(x)` evaluated on the clipped input, in `[e^-20, e^20]`.
pub fn safe_exp(x: f64) -> f64 {
    x.clamp(-EXP_CLIP, EXP_CLIP).exp()
}

/// Floored logarithm: `ln(max(x, LOG_FLOOR))`.
///
/// # Parameters
/// - `x`: input expected to be non-negative.
///
/// # Returns
/// - `ln(x)` for `x ≥ LOG_FLOOR`, otherwise `ln(LOG_FLOOR)`.
pub fn safe_ln(x: f64) -> f64 {
    x.max(LOG_FLOOR).ln()
}

/// Spacing between `|x|` and the next larger `f64`.
///
/// For `x = 0` this is the smallest positive subnormal. Non-finite inputs
/// return `NaN`.
pub fn ulp(x: f64) -> f64 {
    let a = x.abs();
    if !a.is_finite() {
        return f64::NAN;
    }
    f64::from_bits(a.to_bits() + 1) - a
}
