//! Idiosyncratic log-volatility process.
//!
//! Each series carries a scalar AR(1) log-volatility centred at `μ`:
//!
//! `η_t = μ + ρ (η_{t−1} − μ) + ε_t`,  `ε_t ~ N(0, σ²)`.
//!
//! ## Stationary law
//! With `|ρ| < 1` the process has marginal `N(μ, σ²/(1 − ρ²))`. Simulation
//! without a supplied initial value draws `η_0` from that law, so the whole
//! simulated path is stationary and its sample moments converge to
//! `μ` and `σ²/(1 − ρ²)`.
//!
//! ## Validation
//! Non-stationary coefficients (`|ρ| ≥ 1`) and non-positive `σ` are
//! rejected at construction; they are never simulated.
use crate::svmvar::{
    core::validation::{validate_ar1_coefficient, validate_positive_scale},
    errors::{SVMVARError, SVMVARResult},
};
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use statrs::distribution::{Continuous, Normal};

/// AR(1) parameters `(μ, ρ, σ)` of one idiosyncratic log-volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdiosyncraticAR1 {
    pub mu: f64,
    pub rho: f64,
    pub sigma: f64,
}

impl IdiosyncraticAR1 {
    /// Validate and construct the process.
    ///
    /// # Errors
    /// - [`SVMVARError::NonStationaryAR1`] if `|rho| ≥ 1` or `rho` is not finite.
    /// - [`SVMVARError::NonFiniteParameter`] if `mu` is not finite.
    /// - [`SVMVARError::NonPositiveScale`] if `sigma ≤ 0` or is not finite.
    pub fn new(mu: f64, rho: f64, sigma: f64) -> SVMVARResult<Self> {
        if !mu.is_finite() {
            return Err(SVMVARError::NonFiniteParameter { name: "mu", value: mu });
        }
        let rho = validate_ar1_coefficient(rho)?;
        let sigma = validate_positive_scale("sigma", sigma)?;
        Ok(IdiosyncraticAR1 { mu, rho, sigma })
    }

    /// Unconditional mean, `μ`.
    pub fn stationary_mean(&self) -> f64 {
        self.mu
    }

    /// Unconditional variance, `σ²/(1 − ρ²)`.
    pub fn stationary_variance(&self) -> f64 {
        self.sigma * self.sigma / (1.0 - self.rho * self.rho)
    }

    /// One-step conditional mean `μ + ρ (prev − μ)`.
    pub fn conditional_mean(&self, prev: f64) -> f64 {
        self.mu + self.rho * (prev - self.mu)
    }

    /// Simulate a path of length `t_len`.
    ///
    /// Parameters
    /// ----------
    /// - `t_len`: `usize`
    ///   Number of periods; `0` returns an empty array.
    /// - `eta0`: `Option<f64>`
    ///   Initial value `η_0`. When `None`, `η_0 ~ N(μ, σ²/(1 − ρ²))`.
    /// - `rng`: `&mut R`
    ///   Caller-owned random source; seed it for reproducible draws.
    ///
    /// Returns
    /// -------
    /// `Array1<f64>` with `η_0 … η_{T−1}`.
    pub fn simulate<R: Rng + ?Sized>(
        &self, t_len: usize, eta0: Option<f64>, rng: &mut R,
    ) -> Array1<f64> {
        let mut eta = Array1::<f64>::zeros(t_len);
        if t_len == 0 {
            return eta;
        }
        eta[0] = match eta0 {
            Some(value) => value,
            None => {
                let z: f64 = StandardNormal.sample(rng);
                self.mu + self.stationary_variance().sqrt() * z
            }
        };
        for t in 1..t_len {
            let z: f64 = StandardNormal.sample(rng);
            eta[t] = self.conditional_mean(eta[t - 1]) + self.sigma * z;
        }
        eta
    }

    /// Log-density of a path under the process.
    ///
    /// The first value is scored under the stationary law, each later value
    /// under `N(μ + ρ(η_{t−1} − μ), σ²)`. An empty path has log-density 0.
    pub fn log_density(&self, path: ArrayView1<f64>) -> SVMVARResult<f64> {
        let Some(&first) = path.first() else {
            return Ok(0.0);
        };
        let stationary = normal(self.mu, self.stationary_variance().sqrt())?;
        let mut total = stationary.ln_pdf(first);
        for w in path.windows(2) {
            let transition = normal(self.conditional_mean(w[0]), self.sigma)?;
            total += transition.ln_pdf(w[1]);
        }
        Ok(total)
    }
}

fn normal(mean: f64, std_dev: f64) -> SVMVARResult<Normal> {
    Normal::new(mean, std_dev)
        .map_err(|_| SVMVARError::NonPositiveScale { name: "normal std_dev", value: std_dev })
}
