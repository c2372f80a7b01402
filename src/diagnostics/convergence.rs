//! diagnostics::convergence: Geweke z-score and effective sample size.
//!
//! Purpose
//! -------
//! Quantify whether a single MCMC chain has settled (Geweke, 1992) and how
//! many independent draws it is worth (effective sample size).
//!
//! Key behaviors
//! -------------
//! - [`geweke`] compares the mean of the first `first · n` draws with the
//!   mean of the last `last · n` draws, returning a [`GewekeOutcome`] with
//!   the z-score and its two-sided standard-normal p-value.
//! - [`effective_sample_size`] computes `n / (1 + 2 Σ_k ρ̂_k)`, summing
//!   autocorrelations from lag 1 until the first `ρ̂_k < 0.05`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Window variances are naive: population variance over the window size,
//!   with no spectral correction for autocorrelation. The z-score is
//!   therefore optimistic for strongly autocorrelated chains.
//! - Window sizes are `⌊n · first⌋` and `⌊n · last⌋`; the last window is
//!   taken from the end of the chain.
//!
//! Conventions
//! -----------
//! - Reference defaults: `first = 0.1`, `last = 0.5` ([`GEWEKE_FIRST`],
//!   [`GEWEKE_LAST`]); `max_lag = 100` ([`ESS_MAX_LAG`]).
//! - `max_lag` larger than `n − 1` is truncated to `n − 1`.
//!
//! Testing notes
//! -------------
//! - Unit tests check a hand-computed Geweke score, argument validation and
//!   ESS on independent and AR(1) chains.
use crate::diagnostics::{
    autocorrelation::autocorrelation,
    errors::{DiagnosticsError, DiagnosticsResult},
    validation::{mean_and_variance, validate_chain},
};
use log::debug;
use statrs::function::erf::erfc;

/// Default fraction of the chain used for the early Geweke window.
pub const GEWEKE_FIRST: f64 = 0.1;
/// Default fraction of the chain used for the late Geweke window.
pub const GEWEKE_LAST: f64 = 0.5;
/// Default maximum lag for [`effective_sample_size`].
pub const ESS_MAX_LAG: usize = 100;
/// Autocorrelations below this value end the ESS sum.
pub const ESS_ACF_CUTOFF: f64 = 0.05;

/// GewekeOutcome: result of the Geweke convergence diagnostic.
///
/// Fields
/// ------
/// - `z`: `f64`
///   `(x̄_early − x̄_late) / sqrt(s²_early/n_early + s²_late/n_late)`.
/// - `p_value`: `f64`
///   Two-sided p-value `2 (1 − Φ(|z|))`, in [0, 1].
///
/// Notes
/// -----
/// - `|z| < 2` is the customary informal convergence threshold.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GewekeOutcome {
    z: f64,
    p_value: f64,
}

impl GewekeOutcome {
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// `true` when `|z| < 2`.
    pub fn converged(&self) -> bool {
        self.z.abs() < 2.0
    }
}

/// Geweke diagnostic for one chain.
///
/// Parameters
/// ----------
/// - `chain`: `&[f64]`
///   Finite draws in iteration order.
/// - `first`: `f64`
///   Fraction of the chain in the early window, in (0, 1).
/// - `last`: `f64`
///   Fraction of the chain in the late window, in (0, 1), with
///   `first + last ≤ 1`.
///
/// Returns
/// -------
/// `DiagnosticsResult<GewekeOutcome>`
///
/// Errors
/// ------
/// - `DiagnosticsError::InvalidFraction` / `FractionsOverlap` for bad
///   window fractions.
/// - `DiagnosticsError::InsufficientData` if either window would be empty.
/// - `DiagnosticsError::ZeroVariance` if both windows are constant.
/// - Chain validation errors for empty or non-finite chains.
pub fn geweke(chain: &[f64], first: f64, last: f64) -> DiagnosticsResult<GewekeOutcome> {
    validate_fraction("first", first)?;
    validate_fraction("last", last)?;
    if first + last > 1.0 {
        return Err(DiagnosticsError::FractionsOverlap { first, last });
    }
    validate_chain(chain, 1)?;

    let n = chain.len();
    let n1 = (n as f64 * first).floor() as usize;
    let n2 = (n as f64 * last).floor() as usize;
    if n1 == 0 || n2 == 0 {
        let required = (1.0 / first.min(last)).ceil() as usize;
        return Err(DiagnosticsError::InsufficientData { len: n, required });
    }

    let (mean1, var1) = mean_and_variance(&chain[..n1]);
    let (mean2, var2) = mean_and_variance(&chain[n - n2..]);
    let se2 = var1 / n1 as f64 + var2 / n2 as f64;
    if se2 <= 0.0 {
        return Err(DiagnosticsError::ZeroVariance);
    }

    let z = (mean1 - mean2) / se2.sqrt();
    let p_value = erfc(z.abs() / std::f64::consts::SQRT_2).clamp(0.0, 1.0);
    Ok(GewekeOutcome { z, p_value })
}

/// Effective sample size `n / (1 + 2 Σ_k ρ̂_k)`.
///
/// Parameters
/// ----------
/// - `chain`: `&[f64]`
///   At least two finite, non-constant draws.
/// - `max_lag`: `usize`
///   Upper bound on the lags summed; truncated to `n − 1`.
///
/// Returns
/// -------
/// `DiagnosticsResult<f64>`
///   ESS in `(0, n]` for chains whose leading autocorrelations are
///   positive; the sum stops at the first `ρ̂_k <` [`ESS_ACF_CUTOFF`], so
///   negative autocorrelations never inflate the estimate above `n`.
///
/// Errors
/// ------
/// - Chain validation errors and `DiagnosticsError::ZeroVariance` from
///   [`autocorrelation`].
pub fn effective_sample_size(chain: &[f64], max_lag: usize) -> DiagnosticsResult<f64> {
    validate_chain(chain, 2)?;
    let n = chain.len();
    let lag_bound = max_lag.min(n - 1);
    if lag_bound < max_lag {
        debug!("effective_sample_size: max_lag {max_lag} truncated to {lag_bound} for n = {n}");
    }

    let acf = autocorrelation(chain, lag_bound)?;
    let sum_acf: f64 = acf.iter().skip(1).take_while(|&&rho| rho >= ESS_ACF_CUTOFF).sum();
    Ok(n as f64 / (1.0 + 2.0 * sum_acf))
}

// ---- Helper methods ----

fn validate_fraction(name: &'static str, value: f64) -> DiagnosticsResult<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(DiagnosticsError::InvalidFraction { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, StandardNormal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Geweke z-score and p-value on a hand-computed chain.
    // - Geweke argument validation (fractions, window sizes, zero variance).
    // - ESS on a hand-computed chain, an independent chain and an AR(1)
    //   chain with known autocorrelation decay.
    // -------------------------------------------------------------------------

    fn ar1_chain(rho: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = vec![0.0; n];
        for t in 1..n {
            let z: f64 = StandardNormal.sample(&mut rng);
            x[t] = rho * x[t - 1] + z;
        }
        x
    }

    #[test]
    // Purpose
    // -------
    // The z-score uses population window variances divided by window size.
    //
    // Given
    // -----
    // - chain = [0, 2, 9, 9, 9, 1, 3, 1, 3, 1], first = 0.2, last = 0.5.
    // - Early window [0, 2]: mean 1, var 1. Late window [1, 3, 1, 3, 1]:
    //   mean 1.8, var 0.96.
    //
    // Expect
    // ------
    // - z = −0.8 / sqrt(1/2 + 0.96/5), p = erfc(|z|/√2).
    fn geweke_matches_hand_computation() {
        // Arrange
        let chain = [0.0, 2.0, 9.0, 9.0, 9.0, 1.0, 3.0, 1.0, 3.0, 1.0];

        // Act
        let outcome = geweke(&chain, 0.2, 0.5).unwrap();

        // Assert
        let z = -0.8 / (0.5_f64 + 0.192).sqrt();
        assert_relative_eq!(outcome.z(), z, epsilon = 1e-12);
        assert_relative_eq!(
            outcome.p_value(),
            erfc(z.abs() / std::f64::consts::SQRT_2),
            epsilon = 1e-12
        );
        assert!(outcome.converged());
    }

    #[test]
    // Purpose
    // -------
    // A stationary chain yields a finite z and a p-value in [0, 1].
    //
    // Given
    // -----
    // - 4000 i.i.d. standard normal draws, default fractions.
    //
    // Expect
    // ------
    // - Finite z; 0 ≤ p ≤ 1.
    fn geweke_on_stationary_chain_is_well_formed() {
        let chain = ar1_chain(0.0, 4000, 11);

        let outcome = geweke(&chain, GEWEKE_FIRST, GEWEKE_LAST).unwrap();

        assert!(outcome.z().is_finite());
        assert!((0.0..=1.0).contains(&outcome.p_value()));
    }

    #[test]
    // Purpose
    // -------
    // Invalid fractions, empty windows and constant chains are rejected.
    //
    // Given
    // -----
    // - first = 0; first + last = 1.1; a 5-draw chain with first = 0.1; a
    //   constant chain.
    //
    // Expect
    // ------
    // - `InvalidFraction`, `FractionsOverlap`, `InsufficientData`,
    //   `ZeroVariance`.
    fn geweke_rejects_invalid_arguments() {
        let chain = ar1_chain(0.0, 100, 3);

        assert!(matches!(
            geweke(&chain, 0.0, 0.5),
            Err(DiagnosticsError::InvalidFraction { name: "first", .. })
        ));
        assert!(matches!(
            geweke(&chain, 0.6, 0.5),
            Err(DiagnosticsError::FractionsOverlap { .. })
        ));
        assert!(matches!(
            geweke(&chain[..5], 0.1, 0.5),
            Err(DiagnosticsError::InsufficientData { len: 5, .. })
        ));
        assert_eq!(geweke(&[1.0; 50], 0.1, 0.5), Err(DiagnosticsError::ZeroVariance));
    }

    #[test]
    // Purpose
    // -------
    // The ESS sum stops at the first autocorrelation below the cutoff.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4, 5], max_lag = 2: ρ̂ = [1, 0.4, −0.1].
    //
    // Expect
    // ------
    // - ESS = 5 / (1 + 2·0.4).
    fn effective_sample_size_matches_hand_computation() {
        let ess = effective_sample_size(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();

        assert_relative_eq!(ess, 5.0 / 1.8, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // ESS is close to n for independent draws and shrinks by roughly
    // (1 − ρ)/(1 + ρ) for an AR(1) chain.
    //
    // Given
    // -----
    // - 5000 i.i.d. draws; 50000 AR(1) draws with ρ = 0.9 (truncated sum
    //   ≈ 8.5, so ESS ≈ n/18).
    //
    // Expect
    // ------
    // - ESS_iid ≥ 0.9 n; n/25 < ESS_ar1 < n/14.
    fn effective_sample_size_reflects_autocorrelation() {
        let iid = ar1_chain(0.0, 5000, 21);
        let ar1 = ar1_chain(0.9, 50_000, 22);

        let ess_iid = effective_sample_size(&iid, ESS_MAX_LAG).unwrap();
        let ess_ar1 = effective_sample_size(&ar1, ESS_MAX_LAG).unwrap();

        assert!(ess_iid >= 0.9 * 5000.0, "ESS iid = {ess_iid}");
        assert!(ess_ar1 > 50_000.0 / 25.0 && ess_ar1 < 50_000.0 / 14.0, "ESS ar1 = {ess_ar1}");
    }

    #[test]
    // Purpose
    // -------
    // A max_lag beyond the chain length is truncated rather than rejected.
    //
    // Given
    // -----
    // - A 4-draw chain with max_lag = 100.
    //
    // Expect
    // ------
    // - `Ok` with a finite, positive ESS.
    fn effective_sample_size_truncates_max_lag() {
        let ess = effective_sample_size(&[0.5, -1.0, 2.0, 0.1], 100).unwrap();

        assert!(ess.is_finite() && ess > 0.0);
    }
}
