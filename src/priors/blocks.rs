//! priors::blocks: fixed-field prior records and their log-densities.
//!
//! Purpose
//! -------
//! Hold the moments of every prior block in named, shaped fields so a
//! sampler reads `prior.var.mean` instead of looking a string up in a map,
//! and score parameter draws against those moments.
//!
//! Key behaviors
//! -------------
//! - Coefficient blocks ([`VARBlock`], [`VolInMeanBlock`], [`B0Block`],
//!   [`HEquationBlock`]) are independent element-wise Normals; their
//!   `log_density` sums `ln N(x_ij; m_ij, v_ij)` over the stacked layout.
//! - [`EtaAR1Block`] scores one idiosyncratic AR(1) process as
//!   `N(μ) · N(ρ) · Inverse-Gamma(σ²)`.
//! - [`TransitionBlock`] scores a classification path as independent
//!   two-state Markov chains, one per unclassified series.
//!
//! Invariants & assumptions
//! ------------------------
//! - Variances stored in the blocks are variances, not standard deviations.
//! - Shapes follow the stacked layouts of `svmvar::core::params`: VAR n×np,
//!   volatility-in-mean n×2(q+1), `Φ` 2×2ph, `Ψ` 2×n·py.
//! - A draw whose shape disagrees with the block is an error, never
//!   truncated or padded.
//!
//! Conventions
//! -----------
//! - The Inverse-Gamma density is on `σ²`, parameterized by shape `α` and
//!   scale `β`: `p(x) ∝ x^{−α−1} exp(−β/x)`.
//! - The Inverse-Wishart moments of `Σ_h` are stored for samplers that draw
//!   it by conjugacy; no density is evaluated here.
use crate::svmvar::{
    core::{
        classification::{ClassificationPath, Regime},
        idiosyncratic::IdiosyncraticAR1,
        params::{ContemporaneousImpact, HEquationCoefficients, VARCoefficients, VolInMeanCoefficients},
        validation::validate_length,
    },
    errors::{SVMVARError, SVMVARResult},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip, s};
use statrs::distribution::{Continuous, InverseGamma, Normal};

/// Minnesota prior on the stacked VAR matrix `[B₁ … B_p]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VARBlock {
    /// n×np prior mean: 1 on each variable's own first lag, 0 elsewhere.
    pub mean: Array2<f64>,
    /// n×np prior variances.
    pub variance: Array2<f64>,
    /// Prior variance of an intercept, `λ3`.
    pub intercept_variance: f64,
}

impl VARBlock {
    /// Log prior density of the lag matrices.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if the stacked coefficients are not
    ///   the block's n×np shape.
    /// - [`SVMVARError::NonPositiveScale`] if a stored variance is ≤ 0.
    pub fn log_density(&self, b: &VARCoefficients) -> SVMVARResult<f64> {
        let stacked = b.to_stacked();
        elementwise_normal_log_density(
            "B (stacked)",
            stacked.view(),
            self.mean.view(),
            self.variance.view(),
        )
    }

    /// Log prior density of an intercept vector under `N(0, λ3 I)`.
    ///
    /// # Errors
    /// - [`SVMVARError::LengthMismatch`] unless `c` has length n.
    pub fn intercept_log_density(&self, c: ArrayView1<f64>) -> SVMVARResult<f64> {
        validate_length("intercept", c.len(), self.mean.nrows())?;
        let prior = normal(0.0, self.intercept_variance)?;
        Ok(c.iter().map(|&v| prior.ln_pdf(v)).sum())
    }
}

/// Prior on the stacked volatility-in-mean matrix `[A₀ … A_q]`.
///
/// Each row of `A` is `N(mean_row, variance)`; the default variance is
/// diagonal, `λh² I`, so only its diagonal enters [`Self::log_density`].
#[derive(Debug, Clone, PartialEq)]
pub struct VolInMeanBlock {
    pub mean: Array2<f64>,
    pub variance: Array2<f64>,
}

impl VolInMeanBlock {
    /// Log prior density of `A₀…A_q`.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if the stacked coefficients are not
    ///   n×2(q+1) or `variance` is not 2(q+1)×2(q+1).
    pub fn log_density(&self, a: &VolInMeanCoefficients) -> SVMVARResult<f64> {
        let stacked = a.to_stacked();
        let width = self.mean.ncols();
        if self.variance.dim() != (width, width) {
            return Err(SVMVARError::SeriesShape {
                name: "A prior variance",
                expected: (width, width),
                actual: self.variance.dim(),
            });
        }
        let diag = self.variance.diag().insert_axis(Axis(0));
        let variance = diag.broadcast(self.mean.dim()).ok_or(SVMVARError::SeriesShape {
            name: "A prior variance",
            expected: (width, width),
            actual: self.variance.dim(),
        })?;
        elementwise_normal_log_density("A (stacked)", stacked.view(), self.mean.view(), variance)
    }
}

/// Prior on the free parameters of the unit lower-triangular `B0`.
#[derive(Debug, Clone, PartialEq)]
pub struct B0Block {
    /// Length n(n−1)/2, row-major over the strictly-lower triangle.
    pub mean: Array1<f64>,
    pub variance: Array1<f64>,
}

impl B0Block {
    /// Log prior density of the strictly-lower entries of `impact`.
    ///
    /// # Errors
    /// - [`SVMVARError::LengthMismatch`] if `impact` has a different number
    ///   of free parameters.
    pub fn log_density(&self, impact: &ContemporaneousImpact) -> SVMVARResult<f64> {
        let free = impact.free_params();
        validate_length("B0 free parameters", free.len(), self.mean.len())?;
        validate_length("B0 prior variance", self.variance.len(), self.mean.len())?;
        let mut total = 0.0;
        for ((&x, &m), &v) in free.iter().zip(self.mean.iter()).zip(self.variance.iter()) {
            total += normal(m, v)?.ln_pdf(x);
        }
        Ok(total)
    }
}

/// Prior on the common-factor equation.
#[derive(Debug, Clone, PartialEq)]
pub struct HEquationBlock {
    /// 2×2ph, stacked `[Φ₁ … Φ_ph]`.
    pub phi_mean: Array2<f64>,
    pub phi_variance: Array2<f64>,
    /// 2×n·py, stacked `[Ψ₁ … Ψ_py]`.
    pub psi_mean: Array2<f64>,
    pub psi_variance: Array2<f64>,
    /// Inverse-Wishart degrees of freedom for `Σ_h`.
    pub sigma_df: f64,
    /// Inverse-Wishart 2×2 scale matrix for `Σ_h`.
    pub sigma_scale: Array2<f64>,
}

impl HEquationBlock {
    /// Log prior density of `Φ` and `Ψ`.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if the stacked `Φ` or `Ψ` blocks do
    ///   not match the stored moments.
    pub fn log_density(&self, coefs: &HEquationCoefficients) -> SVMVARResult<f64> {
        let phi = stack_rows_of_two(coefs.phi());
        let psi = stack_rows_of_two(coefs.psi());
        let lp_phi = elementwise_normal_log_density(
            "Phi (stacked)",
            phi.view(),
            self.phi_mean.view(),
            self.phi_variance.view(),
        )?;
        let lp_psi = elementwise_normal_log_density(
            "Psi (stacked)",
            psi.view(),
            self.psi_mean.view(),
            self.psi_variance.view(),
        )?;
        Ok(lp_phi + lp_psi)
    }
}

/// Prior on one idiosyncratic AR(1) log-volatility process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtaAR1Block {
    pub mu_mean: f64,
    pub mu_variance: f64,
    pub rho_mean: f64,
    pub rho_variance: f64,
    /// Inverse-Gamma shape on `σ²`.
    pub sigma_shape: f64,
    /// Inverse-Gamma scale on `σ²`.
    pub sigma_scale: f64,
}

impl EtaAR1Block {
    /// `ln N(μ) + ln N(ρ) + ln IG(σ²)` for one process.
    ///
    /// The Normal on `ρ` is not truncated; stationarity is already enforced
    /// when `process` was constructed.
    ///
    /// # Errors
    /// - [`SVMVARError::NonPositiveScale`] if a stored variance is ≤ 0.
    /// - [`SVMVARError::InvalidHyperparameter`] if the Inverse-Gamma
    ///   parameters are rejected.
    pub fn log_density(&self, process: &IdiosyncraticAR1) -> SVMVARResult<f64> {
        let mu_prior = normal(self.mu_mean, self.mu_variance)?;
        let rho_prior = normal(self.rho_mean, self.rho_variance)?;
        let sigma_prior = InverseGamma::new(self.sigma_shape, self.sigma_scale).map_err(|_| {
            SVMVARError::InvalidHyperparameter {
                name: "sigma_eta",
                value: self.sigma_shape,
                reason: "Inverse-Gamma shape and scale must be finite and > 0",
            }
        })?;
        let sigma2 = process.sigma * process.sigma;
        Ok(mu_prior.ln_pdf(process.mu)
            + rho_prior.ln_pdf(process.rho)
            + sigma_prior.ln_pdf(sigma2))
    }
}

/// Two-state Markov transition matrix of the classification labels.
///
/// Row/column 0 is the macro regime, 1 the financial regime:
/// `[[p_MM, 1 − p_MM], [1 − p_FF, p_FF]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionBlock {
    pub matrix: Array2<f64>,
}

impl TransitionBlock {
    /// Build the matrix from the two stay probabilities.
    pub fn from_stay_probabilities(p_stay_macro: f64, p_stay_financial: f64) -> Self {
        let matrix = ndarray::array![
            [p_stay_macro, 1.0 - p_stay_macro],
            [1.0 - p_stay_financial, p_stay_financial]
        ];
        TransitionBlock { matrix }
    }

    /// Stationary distribution `(π_M, π_F)` of the chain.
    ///
    /// `π_M = (1 − p_FF) / (2 − p_MM − p_FF)`. When both regimes are
    /// absorbing the chain has no unique stationary law and the uniform
    /// distribution is returned.
    pub fn stationary_distribution(&self) -> [f64; 2] {
        let p_mm = self.matrix[[0, 0]];
        let p_ff = self.matrix[[1, 1]];
        let denom = 2.0 - p_mm - p_ff;
        if denom <= 0.0 {
            return [0.5, 0.5];
        }
        let pi_m = (1.0 - p_ff) / denom;
        [pi_m, 1.0 - pi_m]
    }

    /// Log-probability of a full classification path.
    ///
    /// Each unclassified series is an independent chain started from
    /// [`Self::stationary_distribution`]. A path using a zero-probability
    /// transition scores `−∞`; an empty path scores 0.
    pub fn log_path_probability(&self, path: &ClassificationPath) -> f64 {
        let start = self.stationary_distribution();
        let labels = path.labels();
        let mut total = 0.0;
        for series in labels.rows() {
            let Some(first) = series.first() else {
                continue;
            };
            total += start[first.factor_index()].ln();
            for w in series.windows(2) {
                total += self.transition_probability(w[0], w[1]).ln();
            }
        }
        total
    }

    fn transition_probability(&self, from: Regime, to: Regime) -> f64 {
        self.matrix[[from.factor_index(), to.factor_index()]]
    }
}

/// Prior on the initial common-factor state `h_0`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialStateBlock {
    pub mean: Array1<f64>,
    pub covariance: Array2<f64>,
}

// ---- Helper methods ----

fn normal(mean: f64, variance: f64) -> SVMVARResult<Normal> {
    Normal::new(mean, variance.sqrt())
        .map_err(|_| SVMVARError::NonPositiveScale { name: "prior variance", value: variance })
}

fn elementwise_normal_log_density(
    name: &'static str, x: ArrayView2<f64>, mean: ArrayView2<f64>, variance: ArrayView2<f64>,
) -> SVMVARResult<f64> {
    if x.dim() != mean.dim() {
        return Err(SVMVARError::SeriesShape { name, expected: mean.dim(), actual: x.dim() });
    }
    if variance.dim() != mean.dim() {
        return Err(SVMVARError::SeriesShape {
            name: "prior variance",
            expected: mean.dim(),
            actual: variance.dim(),
        });
    }
    let mut total = 0.0;
    let mut failure = None;
    Zip::from(x).and(mean).and(variance).for_each(|&xi, &m, &v| {
        if failure.is_some() {
            return;
        }
        match normal(m, v) {
            Ok(d) => total += d.ln_pdf(xi),
            Err(err) => failure = Some(err),
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(total),
    }
}

// `HEquationCoefficients` guarantees a common 2×k shape within each list.
fn stack_rows_of_two(matrices: &[Array2<f64>]) -> Array2<f64> {
    let cols = matrices.first().map_or(0, |m| m.ncols());
    let mut stacked = Array2::zeros((2, cols * matrices.len()));
    for (k, m) in matrices.iter().enumerate() {
        stacked.slice_mut(s![.., k * cols..(k + 1) * cols]).assign(m);
    }
    stacked
}
