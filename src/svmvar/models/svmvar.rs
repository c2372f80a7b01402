//! OI-SVMVAR model: full-sample scoring of one parameter draw.
//!
//! This module wires the core engines together. Given the observation
//! matrix, a complete set of coefficient blocks ([`SVMVARParams`]) and the
//! latent volatility state ([`LatentState`]), [`SVMVARModel`] evaluates:
//!
//! 1. the VAR conditional mean `μ_t` (B, A blocks and `h`);
//! 2. the common-factor conditional mean `h̄_t` (Φ, Ψ blocks);
//! 3. total log-volatilities from `η` and `h` under the classification path;
//! 4. the structural log-likelihood `Σ_{t ≥ max(p, q)} ℓ_t`, using
//!    `B0⁻¹` from the impact block and `Ω_t = exp(clip(ω_t))`.
//!
//! Every block is checked against the model shape before any arithmetic,
//! so a sampler gets a `Dimension` error for a mis-assembled draw rather
//! than a silently truncated computation.
use crate::svmvar::{
    core::{
        classification::ClassificationPath,
        data::ObservationMatrix,
        likelihood::log_likelihood_contributions,
        mean::{h_mean, var_mean},
        params::{
            ContemporaneousImpact, HEquationCoefficients, VARCoefficients, VolInMeanCoefficients,
        },
        shape::SVMVARShape,
        validation::{validate_length, validate_matrix_shape},
        volatility::{TotalLogVolatility, decompose_volatility},
    },
    errors::{SVMVARError, SVMVARResult},
};
use log::trace;
use ndarray::{Array1, Array2, ArrayView2};

/// One draw of every coefficient block.
#[derive(Debug, Clone, PartialEq)]
pub struct SVMVARParams {
    /// `B₁…B_p`.
    pub var: VARCoefficients,
    /// `A₀…A_q`.
    pub vol_in_mean: VolInMeanCoefficients,
    /// `Φ₁…Φ_ph`, `Ψ₁…Ψ_py`.
    pub h_equation: HEquationCoefficients,
    /// `B0`.
    pub impact: ContemporaneousImpact,
}

/// Latent volatility state for a sample of length T.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentState {
    /// T×2 common factors, column 0 = macro, column 1 = financial.
    pub h: Array2<f64>,
    /// T×nm idiosyncratic log-volatilities of the macro series.
    pub eta_m: Array2<f64>,
    /// T×nu idiosyncratic log-volatilities of the unclassified series.
    pub eta_u: Array2<f64>,
    /// T×nf idiosyncratic log-volatilities of the financial series.
    pub eta_f: Array2<f64>,
    /// nu×T regime labels of the unclassified series.
    pub classification: ClassificationPath,
}

/// OI-SVMVAR(p, q; ph, py) evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SVMVARModel {
    pub shape: SVMVARShape,
}

impl SVMVARModel {
    pub fn new(shape: SVMVARShape) -> Self {
        SVMVARModel { shape }
    }

    /// VAR conditional mean `μ` (T×n) for `data` under `params` and `h`.
    ///
    /// # Errors
    /// Dimension errors if `data` or any block disagrees with the shape or
    /// `h` is not T×2.
    pub fn conditional_mean(
        &self, data: &ObservationMatrix, params: &SVMVARParams, h: ArrayView2<f64>,
    ) -> SVMVARResult<Array2<f64>> {
        self.validate_data(data)?;
        self.validate_params(params)?;
        var_mean(data.data(), h, &params.var, &params.vol_in_mean)
    }

    /// Common-factor conditional mean `h̄` (T×2).
    ///
    /// # Errors
    /// As in [`SVMVARModel::conditional_mean`].
    pub fn h_conditional_mean(
        &self, data: &ObservationMatrix, params: &SVMVARParams, h: ArrayView2<f64>,
    ) -> SVMVARResult<Array2<f64>> {
        self.validate_data(data)?;
        self.validate_params(params)?;
        h_mean(h, data.data(), &params.h_equation)
    }

    /// Total log-volatilities implied by `state`.
    ///
    /// # Errors
    /// Dimension errors if the `η` blocks do not match the group sizes or
    /// the state matrices disagree on T.
    pub fn total_log_volatility(&self, state: &LatentState) -> SVMVARResult<TotalLogVolatility> {
        let t_len = state.h.nrows();
        self.validate_state(state, t_len)?;
        decompose_volatility(
            state.eta_m.view(),
            state.eta_u.view(),
            state.eta_f.view(),
            state.h.column(0),
            state.h.column(1),
            &state.classification,
        )
    }

    /// Per-period log-likelihood contributions for `t = max(p, q) … T−1`.
    ///
    /// # Errors
    /// - Dimension errors for mis-shaped data, blocks or state.
    /// - [`SVMVARError::SingularImpactMatrix`] if `B0` cannot be inverted.
    pub fn log_likelihood_contributions(
        &self, data: &ObservationMatrix, params: &SVMVARParams, state: &LatentState,
    ) -> SVMVARResult<Array1<f64>> {
        self.validate_data(data)?;
        self.validate_params(params)?;
        self.validate_state(state, data.t_len())?;

        let mu = var_mean(data.data(), state.h.view(), &params.var, &params.vol_in_mean)?;
        let omega = self.total_log_volatility(state)?.variances();
        let b0_inv = params.impact.inverse()?;
        let start = self.shape.mean_burn_in();
        trace!("scoring periods {start}..{} of an n = {} SVMVAR", data.t_len(), data.n());

        log_likelihood_contributions(data.data(), mu.view(), b0_inv.view(), omega.view(), start)
    }

    /// Sample log-likelihood `Σ_{t ≥ max(p, q)} ℓ_t` of one draw.
    ///
    /// # Errors
    /// As in [`SVMVARModel::log_likelihood_contributions`].
    pub fn log_likelihood(
        &self, data: &ObservationMatrix, params: &SVMVARParams, state: &LatentState,
    ) -> SVMVARResult<f64> {
        Ok(self.log_likelihood_contributions(data, params, state)?.sum())
    }

    // ---- Helper methods ----

    fn validate_data(&self, data: &ObservationMatrix) -> SVMVARResult<()> {
        let expected = self.shape.n();
        if data.n() != expected {
            return Err(SVMVARError::ColumnCountMismatch { expected, actual: data.n() });
        }
        if data.groups() != self.shape.groups {
            return Err(SVMVARError::GroupSizeMismatch {
                expected: self.shape.groups,
                actual: data.groups(),
            });
        }
        Ok(())
    }

    fn validate_params(&self, params: &SVMVARParams) -> SVMVARResult<()> {
        let n = self.shape.n();
        validate_length("B", params.var.p(), self.shape.p)?;
        validate_length("A", params.vol_in_mean.matrices().len(), self.shape.q + 1)?;
        validate_length("Phi", params.h_equation.ph(), self.shape.ph)?;
        validate_length("Psi", params.h_equation.py(), self.shape.py)?;
        validate_length("B0", params.impact.n(), n)?;
        Ok(())
    }

    fn validate_state(&self, state: &LatentState, t_len: usize) -> SVMVARResult<()> {
        let g = self.shape.groups;
        validate_matrix_shape("h", state.h.view(), (t_len, 2))?;
        validate_matrix_shape("eta_m", state.eta_m.view(), (t_len, g.nm))?;
        validate_matrix_shape("eta_u", state.eta_u.view(), (t_len, g.nu))?;
        validate_matrix_shape("eta_f", state.eta_f.view(), (t_len, g.nf))?;
        Ok(())
    }
}
