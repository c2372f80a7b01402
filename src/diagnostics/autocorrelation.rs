//! diagnostics::autocorrelation: sample ACF of a scalar chain.
//!
//! `ρ̂_k = Σ_{t=k}^{n−1} (x_t − x̄)(x_{t−k} − x̄) / Σ_t (x_t − x̄)²`, the
//! biased estimator with a common `Σ (x_t − x̄)²` denominator at every
//! lag, so `ρ̂_0 = 1` and `|ρ̂_k| ≤ 1`.
use crate::diagnostics::{
    errors::{DiagnosticsError, DiagnosticsResult},
    validation::{mean_and_variance, validate_chain},
};
use ndarray::Array1;

/// Autocorrelations at lags `0..=max_lag`.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   Chain of draws; must be finite with at least `max_lag + 1` entries.
/// - `max_lag`: `usize`
///   Largest lag computed.
///
/// Returns
/// -------
/// `DiagnosticsResult<Array1<f64>>`
///   Length `max_lag + 1`, with entry 0 equal to 1.
///
/// Errors
/// ------
/// - Chain validation errors from [`validate_chain`].
/// - `DiagnosticsError::ZeroVariance` for a constant chain.
pub fn autocorrelation(x: &[f64], max_lag: usize) -> DiagnosticsResult<Array1<f64>> {
    validate_chain(x, max_lag.saturating_add(1))?;
    let (mean, var) = mean_and_variance(x);
    if var <= 0.0 {
        return Err(DiagnosticsError::ZeroVariance);
    }
    let centered: Vec<f64> = x.iter().map(|v| v - mean).collect();
    let c0: f64 = centered.iter().map(|v| v * v).sum();

    let mut acf = Array1::<f64>::zeros(max_lag + 1);
    acf[0] = 1.0;
    for lag in 1..=max_lag {
        let c_lag: f64 =
            centered[lag..].iter().zip(&centered[..centered.len() - lag]).map(|(a, b)| a * b).sum();
        acf[lag] = c_lag / c0;
    }
    Ok(acf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, StandardNormal};

    #[test]
    // Purpose
    // -------
    // Hand-computed ACF of a short linear trend.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4, 5]: centered [−2, −1, 0, 1, 2], c0 = 10.
    //
    // Expect
    // ------
    // - ACF = [1, 0.4, −0.1].
    fn autocorrelation_matches_hand_computation() {
        // Arrange
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];

        // Act
        let acf = autocorrelation(&x, 2).unwrap();

        // Assert
        assert_relative_eq!(acf[0], 1.0);
        assert_relative_eq!(acf[1], 0.4, epsilon = 1e-12);
        assert_relative_eq!(acf[2], -0.1, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The lag-1 autocorrelation of a long AR(1) chain recovers ρ.
    //
    // Given
    // -----
    // - x_t = 0.7 x_{t−1} + z_t, T = 20000, seed 7.
    //
    // Expect
    // ------
    // - ρ̂_1 ≈ 0.7 and ρ̂_2 ≈ 0.49 within 0.03.
    fn autocorrelation_recovers_ar1_coefficient() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(7);
        let mut x = vec![0.0; 20_000];
        for t in 1..x.len() {
            let z: f64 = StandardNormal.sample(&mut rng);
            x[t] = 0.7 * x[t - 1] + z;
        }

        // Act
        let acf = autocorrelation(&x, 2).unwrap();

        // Assert
        assert!((acf[1] - 0.7).abs() < 0.03, "rho_1 = {}", acf[1]);
        assert!((acf[2] - 0.49).abs() < 0.03, "rho_2 = {}", acf[2]);
    }

    #[test]
    // Purpose
    // -------
    // Constant and too-short chains are rejected.
    //
    // Given
    // -----
    // - A constant chain; a 3-draw chain with max_lag = 5.
    //
    // Expect
    // ------
    // - `ZeroVariance`; `InsufficientData { len: 3, required: 6 }`.
    fn autocorrelation_rejects_degenerate_chains() {
        assert_eq!(autocorrelation(&[2.0; 10], 1), Err(DiagnosticsError::ZeroVariance));
        assert_eq!(
            autocorrelation(&[1.0, 2.0, 3.0], 5),
            Err(DiagnosticsError::InsufficientData { len: 3, required: 6 })
        );
    }

    #[test]
    // Purpose
    // -------
    // An unbounded lag request is reported as too little data instead of
    // wrapping the required length.
    //
    // Given
    // -----
    // - x = [1, 2, 3] and max_lag = usize::MAX.
    //
    // Expect
    // ------
    // - `InsufficientData { len: 3, required: usize::MAX }`.
    fn autocorrelation_rejects_unbounded_lag() {
        let x = [1.0, 2.0, 3.0];

        let err = autocorrelation(&x, usize::MAX).unwrap_err();

        assert_eq!(err, DiagnosticsError::InsufficientData { len: 3, required: usize::MAX });
    }
}
