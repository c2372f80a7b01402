//! priors::builder: assemble the full prior from a config and a shape.
//!
//! Purpose
//! -------
//! Turn a validated [`PriorConfig`], the model's [`SVMVARShape`] and the
//! OLS residual scales `σ_ols` into a [`PriorSpecification`] whose blocks
//! have exactly the shapes the model's coefficient containers use.
//!
//! Key behaviors
//! -------------
//! - Minnesota prior on `[B₁ … B_p]`: mean 1 on own first lag, variance
//!   `(λ0 / ℓ^λ1)²` on own lags and `(λ0 λ2 σ_i / (σ_j ℓ^λ1))²` on
//!   cross lags, at column `(ℓ − 1)·n + j` of equation `i`.
//! - Volatility-in-mean prior is n×2(q+1), one column pair per `A_j`,
//!   including the contemporaneous `A₀`.
//! - Every other block broadcasts the scalar hyperparameters to its shape.
//!
//! Invariants & assumptions
//! ------------------------
//! - `σ_ols` has length n with finite, strictly positive entries; it is
//!   typically [`crate::linalg::OlsVar::residual_scale`].
//! - The builder is pure: building twice from the same inputs gives equal
//!   specifications.
use crate::{
    priors::{
        blocks::{
            B0Block, EtaAR1Block, HEquationBlock, InitialStateBlock, TransitionBlock, VARBlock,
            VolInMeanBlock,
        },
        config::PriorConfig,
    },
    svmvar::{
        core::{
            shape::SVMVARShape,
            validation::{validate_length, validate_positive_scale},
        },
        errors::SVMVARResult,
        models::SVMVARParams,
    },
};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1};

/// Complete prior: one record per parameter block.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorSpecification {
    pub var: VARBlock,
    pub vol_in_mean: VolInMeanBlock,
    pub b0: B0Block,
    pub h_equation: HEquationBlock,
    /// Shared by every idiosyncratic AR(1) process.
    pub eta_ar1: EtaAR1Block,
    pub transition: TransitionBlock,
    pub initial_state: InitialStateBlock,
}

impl PriorSpecification {
    /// Joint log prior density of the coefficient blocks of one draw
    /// (`B`, `A`, `B0`, `Φ`, `Ψ`).
    ///
    /// # Errors
    /// Propagates shape mismatches between `params` and the blocks.
    pub fn coefficient_log_density(&self, params: &SVMVARParams) -> SVMVARResult<f64> {
        Ok(self.var.log_density(&params.var)?
            + self.vol_in_mean.log_density(&params.vol_in_mean)?
            + self.b0.log_density(&params.impact)?
            + self.h_equation.log_density(&params.h_equation)?)
    }
}

/// Builder for [`PriorSpecification`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorBuilder {
    pub config: PriorConfig,
    pub shape: SVMVARShape,
}

impl PriorBuilder {
    /// Pair a hyperparameter set with a model shape.
    ///
    /// Parameters
    /// ----------
    /// - `config`: `PriorConfig`
    ///   Hyperparameters; checked by [`PriorBuilder::build`].
    /// - `shape`: `SVMVARShape`
    ///   Group sizes and lag orders fixing every block's dimensions.
    ///
    /// Returns
    /// -------
    /// `PriorBuilder`
    ///   No validation happens here.
    pub fn new(config: PriorConfig, shape: SVMVARShape) -> Self {
        PriorBuilder { config, shape }
    }

    /// Build every prior block.
    ///
    /// Parameters
    /// ----------
    /// - `sigma_ols`: `ArrayView1<f64>`
    ///   Residual standard deviations of a univariate or VAR OLS fit, one
    ///   per variable, used to scale the cross-variable Minnesota variances.
    ///
    /// Returns
    /// -------
    /// `SVMVARResult<PriorSpecification>`
    ///
    /// Errors
    /// ------
    /// - Any error from [`PriorConfig::validate`].
    /// - `SVMVARError::LengthMismatch` if `sigma_ols.len() != n`.
    /// - `SVMVARError::NonPositiveScale` for a non-finite or non-positive
    ///   `σ_ols` entry.
    pub fn build(&self, sigma_ols: ArrayView1<f64>) -> SVMVARResult<PriorSpecification> {
        self.config.validate()?;
        let prior = PriorSpecification {
            var: self.var_block(sigma_ols)?,
            vol_in_mean: self.vol_in_mean_block(),
            b0: self.b0_block(),
            h_equation: self.h_equation_block(),
            eta_ar1: self.eta_ar1_block(),
            transition: self.transition_block(),
            initial_state: self.initial_state_block(),
        };
        debug!(
            "built OI-SVMVAR prior: n = {}, p = {}, q = {}, ph = {}, py = {}, {} B0 parameters",
            self.shape.n(),
            self.shape.p,
            self.shape.q,
            self.shape.ph,
            self.shape.py,
            prior.b0.mean.len()
        );
        Ok(prior)
    }

    /// Minnesota prior on the stacked VAR matrix.
    ///
    /// # Errors
    /// As for the `σ_ols` checks of [`PriorBuilder::build`].
    pub fn var_block(&self, sigma_ols: ArrayView1<f64>) -> SVMVARResult<VARBlock> {
        let n = self.shape.n();
        let p = self.shape.p;
        validate_length("sigma_ols", sigma_ols.len(), n)?;
        for &s in sigma_ols.iter() {
            validate_positive_scale("sigma_ols", s)?;
        }

        let c = &self.config;
        let mut mean = Array2::<f64>::zeros((n, n * p));
        let mut variance = Array2::<f64>::zeros((n, n * p));
        for i in 0..n {
            mean[[i, i]] = 1.0;
            for lag in 1..=p {
                let decay = (lag as f64).powf(c.lambda_1);
                for j in 0..n {
                    let sd = if i == j {
                        c.lambda_0 / decay
                    } else {
                        c.lambda_0 * c.lambda_2 * sigma_ols[i] / (sigma_ols[j] * decay)
                    };
                    variance[[i, (lag - 1) * n + j]] = sd * sd;
                }
            }
        }
        Ok(VARBlock { mean, variance, intercept_variance: c.lambda_3 })
    }

    pub fn vol_in_mean_block(&self) -> VolInMeanBlock {
        let width = 2 * (self.shape.q + 1);
        VolInMeanBlock {
            mean: Array2::zeros((self.shape.n(), width)),
            variance: Array2::<f64>::eye(width) * self.config.lambda_h.powi(2),
        }
    }

    pub fn b0_block(&self) -> B0Block {
        let k = self.shape.n_impact_params();
        B0Block {
            mean: Array1::from_elem(k, self.config.b0_mean),
            variance: Array1::from_elem(k, self.config.b0_std.powi(2)),
        }
    }

    pub fn h_equation_block(&self) -> HEquationBlock {
        let c = &self.config;
        let phi_dim = (2, 2 * self.shape.ph);
        let psi_dim = (2, self.shape.n() * self.shape.py);
        HEquationBlock {
            phi_mean: Array2::from_elem(phi_dim, c.phi_mean),
            phi_variance: Array2::from_elem(phi_dim, c.phi_std.powi(2)),
            psi_mean: Array2::from_elem(psi_dim, c.psi_mean),
            psi_variance: Array2::from_elem(psi_dim, c.psi_std.powi(2)),
            sigma_df: c.sigma_h_df,
            sigma_scale: Array2::<f64>::eye(2) * c.sigma_h_scale,
        }
    }

    pub fn eta_ar1_block(&self) -> EtaAR1Block {
        let c = &self.config;
        EtaAR1Block {
            mu_mean: c.mu_eta_mean,
            mu_variance: c.mu_eta_std.powi(2),
            rho_mean: c.rho_eta_mean,
            rho_variance: c.rho_eta_std.powi(2),
            sigma_shape: c.sigma_eta_shape,
            sigma_scale: c.sigma_eta_scale,
        }
    }

    pub fn transition_block(&self) -> TransitionBlock {
        TransitionBlock::from_stay_probabilities(
            self.config.p_stay_macro,
            self.config.p_stay_financial,
        )
    }

    /// `h_0 ~ N(0, I₂)`.
    pub fn initial_state_block(&self) -> InitialStateBlock {
        InitialStateBlock { mean: Array1::zeros(2), covariance: Array2::eye(2) }
    }
}
