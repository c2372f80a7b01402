//! Prior hyperparameters.
//!
//! [`PriorConfig`] gathers every scalar hyperparameter of the OI-SVMVAR
//! prior in one struct. The defaults are the Minnesota tightness and block
//! settings of the reference application and are kept exactly, since
//! published results depend on them.
use crate::svmvar::{
    core::validation::{validate_positive_scale, validate_probability},
    errors::{SVMVARError, SVMVARResult},
};

/// Hyperparameters for every prior block.
///
/// Fields
/// ------
/// Minnesota prior on `B`:
/// - `lambda_0` overall tightness (0.2), `lambda_1` lag decay (1.0),
///   `lambda_2` cross-variable shrinkage (0.5), `lambda_3` intercept
///   variance (100.0).
///
/// Volatility-in-mean `A`:
/// - `lambda_h` prior standard deviation of every `A` coefficient (0.1).
///
/// Contemporaneous `B0` free parameters:
/// - `b0_mean` (0.0), `b0_std` (1.0).
///
/// Common-factor equation:
/// - `phi_mean` (0.5) / `phi_std` (0.2) for `Φ`,
///   `psi_mean` (0.0) / `psi_std` (0.1) for `Ψ`,
/// - `sigma_h_df` (5.0) / `sigma_h_scale` (0.1) for the Inverse-Wishart
///   prior `Σ_h ~ IW(df, scale · I₂)`.
///
/// Idiosyncratic AR(1):
/// - `mu_eta_mean` (0.0) / `mu_eta_std` (1.0),
///   `rho_eta_mean` (0.8) / `rho_eta_std` (0.1),
/// - `sigma_eta_shape` (3.0) / `sigma_eta_scale` (0.1) for
///   `σ²_η ~ Inverse-Gamma(shape, scale)`.
///
/// Classification:
/// - `p_stay_macro` (0.95), `p_stay_financial` (0.95).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorConfig {
    pub lambda_0: f64,
    pub lambda_1: f64,
    pub lambda_2: f64,
    pub lambda_3: f64,
    pub lambda_h: f64,
    pub b0_mean: f64,
    pub b0_std: f64,
    pub phi_mean: f64,
    pub phi_std: f64,
    pub psi_mean: f64,
    pub psi_std: f64,
    pub sigma_h_df: f64,
    pub sigma_h_scale: f64,
    pub mu_eta_mean: f64,
    pub mu_eta_std: f64,
    pub rho_eta_mean: f64,
    pub rho_eta_std: f64,
    pub sigma_eta_shape: f64,
    pub sigma_eta_scale: f64,
    pub p_stay_macro: f64,
    pub p_stay_financial: f64,
}

impl Default for PriorConfig {
    fn default() -> Self {
        PriorConfig {
            lambda_0: 0.2,
            lambda_1: 1.0,
            lambda_2: 0.5,
            lambda_3: 100.0,
            lambda_h: 0.1,
            b0_mean: 0.0,
            b0_std: 1.0,
            phi_mean: 0.5,
            phi_std: 0.2,
            psi_mean: 0.0,
            psi_std: 0.1,
            sigma_h_df: 5.0,
            sigma_h_scale: 0.1,
            mu_eta_mean: 0.0,
            mu_eta_std: 1.0,
            rho_eta_mean: 0.8,
            rho_eta_std: 0.1,
            sigma_eta_shape: 3.0,
            sigma_eta_scale: 0.1,
            p_stay_macro: 0.95,
            p_stay_financial: 0.95,
        }
    }
}

impl PriorConfig {
    /// Check every hyperparameter against the distribution it feeds.
    ///
    /// Errors
    /// ------
    /// - `SVMVARError::NonPositiveScale` for a tightness, standard deviation,
    ///   shape or scale that is not finite and > 0.
    /// - `SVMVARError::InvalidHyperparameter` for a non-finite mean, a
    ///   negative or non-finite lag decay, or `sigma_h_df ≤ 1`.
    /// - `SVMVARError::InvalidProbability` for stay probabilities outside
    ///   `[0, 1]`.
    pub fn validate(&self) -> SVMVARResult<()> {
        let scales = [
            ("lambda_0", self.lambda_0),
            ("lambda_2", self.lambda_2),
            ("lambda_3", self.lambda_3),
            ("lambda_h", self.lambda_h),
            ("b0_std", self.b0_std),
            ("phi_std", self.phi_std),
            ("psi_std", self.psi_std),
            ("sigma_h_scale", self.sigma_h_scale),
            ("mu_eta_std", self.mu_eta_std),
            ("rho_eta_std", self.rho_eta_std),
            ("sigma_eta_shape", self.sigma_eta_shape),
            ("sigma_eta_scale", self.sigma_eta_scale),
        ];
        for (name, value) in scales {
            validate_positive_scale(name, value)?;
        }

        let means = [
            ("b0_mean", self.b0_mean),
            ("phi_mean", self.phi_mean),
            ("psi_mean", self.psi_mean),
            ("mu_eta_mean", self.mu_eta_mean),
            ("rho_eta_mean", self.rho_eta_mean),
        ];
        for (name, value) in means {
            if !value.is_finite() {
                return Err(SVMVARError::InvalidHyperparameter {
                    name,
                    value,
                    reason: "prior means must be finite",
                });
            }
        }

        if !self.lambda_1.is_finite() || self.lambda_1 < 0.0 {
            return Err(SVMVARError::InvalidHyperparameter {
                name: "lambda_1",
                value: self.lambda_1,
                reason: "lag decay must be finite and non-negative",
            });
        }
        if !(self.sigma_h_df > 1.0) || !self.sigma_h_df.is_finite() {
            return Err(SVMVARError::InvalidHyperparameter {
                name: "sigma_h_df",
                value: self.sigma_h_df,
                reason: "Inverse-Wishart degrees of freedom must exceed dimension - 1 = 1",
            });
        }

        validate_probability("p_stay_macro", self.p_stay_macro)?;
        validate_probability("p_stay_financial", self.p_stay_financial)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults reproduce the reference hyperparameters and validate.
    //
    // Given
    // -----
    // - `PriorConfig::default()`.
    //
    // Expect
    // ------
    // - Every documented default value; `validate()` is Ok.
    fn default_matches_reference_values() {
        let c = PriorConfig::default();

        assert_eq!((c.lambda_0, c.lambda_1, c.lambda_2, c.lambda_3), (0.2, 1.0, 0.5, 100.0));
        assert_eq!(c.lambda_h, 0.1);
        assert_eq!((c.b0_mean, c.b0_std), (0.0, 1.0));
        assert_eq!((c.phi_mean, c.phi_std, c.psi_mean, c.psi_std), (0.5, 0.2, 0.0, 0.1));
        assert_eq!((c.sigma_h_df, c.sigma_h_scale), (5.0, 0.1));
        assert_eq!((c.mu_eta_mean, c.mu_eta_std, c.rho_eta_mean, c.rho_eta_std), (0.0, 1.0, 0.8, 0.1));
        assert_eq!((c.sigma_eta_shape, c.sigma_eta_scale), (3.0, 0.1));
        assert_eq!((c.p_stay_macro, c.p_stay_financial), (0.95, 0.95));
        assert!(c.validate().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Invalid hyperparameters are rejected with the matching variant.
    //
    // Given
    // -----
    // - b0_std = 0, p_stay_macro = 1.5, sigma_h_df = 1.0, lambda_1 = −1.
    //
    // Expect
    // ------
    // - `NonPositiveScale`, `InvalidProbability`, `InvalidHyperparameter` ×2.
    fn validate_rejects_invalid_hyperparameters() {
        let zero_std = PriorConfig { b0_std: 0.0, ..PriorConfig::default() };
        let bad_prob = PriorConfig { p_stay_macro: 1.5, ..PriorConfig::default() };
        let bad_df = PriorConfig { sigma_h_df: 1.0, ..PriorConfig::default() };
        let bad_decay = PriorConfig { lambda_1: -1.0, ..PriorConfig::default() };

        assert_eq!(
            zero_std.validate(),
            Err(SVMVARError::NonPositiveScale { name: "b0_std", value: 0.0 })
        );
        assert!(matches!(
            bad_prob.validate(),
            Err(SVMVARError::InvalidProbability { name: "p_stay_macro", .. })
        ));
        assert!(matches!(
            bad_df.validate(),
            Err(SVMVARError::InvalidHyperparameter { name: "sigma_h_df", .. })
        ));
        assert!(matches!(
            bad_decay.validate(),
            Err(SVMVARError::InvalidHyperparameter { name: "lambda_1", .. })
        ));
    }
}
