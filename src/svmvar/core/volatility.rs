//! Volatility decomposition engine.
//!
//! Purpose
//! -------
//! Combine idiosyncratic log-volatilities with the common factors to obtain
//! the total log-volatility of every observed series, and turn those into
//! the diagonal covariance `U_t = diag(Ω_m,t, Ω_u,t, Ω_f,t)` consumed by the
//! likelihood.
//!
//! Key behaviors
//! -------------
//! - macro: `ω_m[t, i] = η_m[t, i] + h_m[t]`;
//! - financial: `ω_f[t, i] = η_f[t, i] + h_f[t]`;
//! - unclassified: `ω_u[t, i] = η_u[t, i] + h_m[t]` when the path labels
//!   `(i, t)` as macro, `η_u[t, i] + h_f[t]` otherwise.
//!
//! Invariants & assumptions
//! ------------------------
//! - The decomposition is exact: `ω − η` equals the assigned factor with no
//!   rounding beyond one floating-point addition.
//! - The classification path is a raw lookup table; nothing is inferred
//!   from neighbouring periods or series.
//! - Variances are `exp(clip(ω, −20, 20))`, so they are always finite and
//!   strictly positive.
//!
//! Conventions
//! -----------
//! - Group matrices are T×n_g (rows are time); the classification path is
//!   nu×T (rows are series).
//! - Observation column order is `[macro] + [unclassified] + [financial]`.
use crate::{
    numerical_stability::transformations::safe_exp,
    svmvar::{
        core::{
            classification::{ClassificationPath, Regime},
            validation::{validate_length, validate_matrix_shape},
        },
        errors::{SVMVARError, SVMVARResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

/// Total log-volatilities by group, each T×n_g.
///
/// All three group matrices share the same number of rows T; the
/// constructors reject anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalLogVolatility {
    macro_vol: Array2<f64>,
    unclassified_vol: Array2<f64>,
    financial_vol: Array2<f64>,
}

impl TotalLogVolatility {
    /// Assemble group log-volatilities computed elsewhere.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if the unclassified or financial matrix
    ///   does not have as many rows as the macro matrix.
    pub fn new(
        macro_vol: Array2<f64>, unclassified_vol: Array2<f64>, financial_vol: Array2<f64>,
    ) -> SVMVARResult<Self> {
        let t_len = macro_vol.nrows();
        validate_matrix_shape(
            "unclassified_vol",
            unclassified_vol.view(),
            (t_len, unclassified_vol.ncols()),
        )?;
        validate_matrix_shape("financial_vol", financial_vol.view(), (t_len, financial_vol.ncols()))?;
        Ok(TotalLogVolatility { macro_vol, unclassified_vol, financial_vol })
    }

    /// Number of periods T.
    pub fn t_len(&self) -> usize {
        self.macro_vol.nrows()
    }

    /// Number of observed series n.
    pub fn n(&self) -> usize {
        self.macro_vol.ncols() + self.unclassified_vol.ncols() + self.financial_vol.ncols()
    }

    pub fn macro_vol(&self) -> ArrayView2<f64> {
        self.macro_vol.view()
    }

    pub fn unclassified_vol(&self) -> ArrayView2<f64> {
        self.unclassified_vol.view()
    }

    pub fn financial_vol(&self) -> ArrayView2<f64> {
        self.financial_vol.view()
    }

    /// T×n log-volatilities in observation column order.
    pub fn log_volatility(&self) -> Array2<f64> {
        let nm = self.macro_vol.ncols();
        let nu = self.unclassified_vol.ncols();
        let mut out = Array2::zeros((self.t_len(), self.n()));
        out.slice_mut(s![.., ..nm]).assign(&self.macro_vol);
        out.slice_mut(s![.., nm..nm + nu]).assign(&self.unclassified_vol);
        out.slice_mut(s![.., nm + nu..]).assign(&self.financial_vol);
        out
    }

    /// T×n variances `exp(clip(ω, −20, 20))` in observation column order.
    pub fn variances(&self) -> Array2<f64> {
        self.log_volatility().mapv(safe_exp)
    }

    /// n×n diagonal covariance `U_t`, or `None` when `t ≥ T`.
    pub fn covariance_at(&self, t: usize) -> Option<Array2<f64>> {
        if t >= self.t_len() {
            return None;
        }
        let diag: Array1<f64> = self
            .macro_vol
            .row(t)
            .iter()
            .chain(self.unclassified_vol.row(t).iter())
            .chain(self.financial_vol.row(t).iter())
            .map(|&w| safe_exp(w))
            .collect();
        Some(Array2::from_diag(&diag))
    }
}

/// Decompose total log-volatility into idiosyncratic and common parts.
///
/// Parameters
/// ----------
/// - `eta_m`, `eta_u`, `eta_f`: `ArrayView2<f64>`
///   Idiosyncratic log-volatilities, T×nm, T×nu and T×nf.
/// - `h_m`, `h_f`: `ArrayView1<f64>`
///   Common macro and financial log-volatility factors, length T.
/// - `classification`: `&ClassificationPath`
///   nu×T regime table for the unclassified series.
///
/// Returns
/// -------
/// `SVMVARResult<TotalLogVolatility>`
///
/// Errors
/// ------
/// - `SVMVARError::LengthMismatch` if `h_f.len() != h_m.len()`.
/// - `SVMVARError::SeriesShape` if an `η` matrix does not have T rows or the
///   classification path is not nu×T.
pub fn decompose_volatility(
    eta_m: ArrayView2<f64>, eta_u: ArrayView2<f64>, eta_f: ArrayView2<f64>,
    h_m: ArrayView1<f64>, h_f: ArrayView1<f64>, classification: &ClassificationPath,
) -> SVMVARResult<TotalLogVolatility> {
    let t_len = h_m.len();
    let nu = eta_u.ncols();
    validate_length("h_f", h_f.len(), t_len)?;
    validate_matrix_shape("eta_m", eta_m, (t_len, eta_m.ncols()))?;
    validate_matrix_shape("eta_u", eta_u, (t_len, nu))?;
    validate_matrix_shape("eta_f", eta_f, (t_len, eta_f.ncols()))?;
    if classification.labels().dim() != (nu, t_len) {
        return Err(SVMVARError::SeriesShape {
            name: "classification",
            expected: (nu, t_len),
            actual: classification.labels().dim(),
        });
    }

    let macro_vol = &eta_m + &h_m.slice(s![.., ndarray::NewAxis]);
    let financial_vol = &eta_f + &h_f.slice(s![.., ndarray::NewAxis]);

    let mut unclassified_vol = eta_u.to_owned();
    for ((t, i), w) in unclassified_vol.indexed_iter_mut() {
        *w += match classification.regime(i, t) {
            Regime::Macro => h_m[t],
            Regime::Financial => h_f[t],
        };
    }

    Ok(TotalLogVolatility { macro_vol, unclassified_vol, financial_vol })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Exact decomposition identities for all three groups, including a
    //   classification path that switches per (i, t).
    // - Variance clipping and covariance diagonal layout.
    // - Shape errors, including group matrices that disagree on T.
    // -------------------------------------------------------------------------

    struct Fixture {
        eta_m: Array2<f64>,
        eta_u: Array2<f64>,
        eta_f: Array2<f64>,
        h_m: Array1<f64>,
        h_f: Array1<f64>,
        path: ClassificationPath,
    }

    fn fixture() -> Fixture {
        Fixture {
            eta_m: array![[0.1], [0.2], [0.3], [0.4]],
            eta_u: array![[1.0, -1.0], [1.5, -1.5], [2.0, -2.0], [2.5, -2.5]],
            eta_f: array![[0.0, 0.5], [0.1, 0.6], [0.2, 0.7], [0.3, 0.8]],
            h_m: array![-0.3, -0.2, -0.1, 0.0],
            h_f: array![0.7, 0.8, 0.9, 1.0],
            path: ClassificationPath::from_codes(array![[0_i64, 1, 1, 0], [1, 0, 1, 0]].view())
                .unwrap(),
        }
    }

    #[test]
    // Purpose
    // -------
    // `ω − η` equals the assigned common factor exactly for every group
    // member, following the per-(i, t) labels for unclassified series.
    //
    // Given
    // -----
    // - nm = 1, nu = 2, nf = 2, T = 4 with a path that switches irregularly.
    //
    // Expect
    // ------
    // - Exact equality of the differences with h_m / h_f.
    fn decomposition_identities_hold_exactly() {
        let f = fixture();

        let vol = decompose_volatility(
            f.eta_m.view(),
            f.eta_u.view(),
            f.eta_f.view(),
            f.h_m.view(),
            f.h_f.view(),
            &f.path,
        )
        .unwrap();

        for t in 0..4 {
            assert_eq!(vol.macro_vol()[[t, 0]], f.eta_m[[t, 0]] + f.h_m[t]);
            for i in 0..2 {
                assert_eq!(vol.financial_vol()[[t, i]], f.eta_f[[t, i]] + f.h_f[t]);
                let factor = match f.path.regime(i, t) {
                    Regime::Macro => f.h_m[t],
                    Regime::Financial => f.h_f[t],
                };
                assert_eq!(vol.unclassified_vol()[[t, i]], f.eta_u[[t, i]] + factor);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Variances follow observation column order and are clipped.
    //
    // Given
    // -----
    // - The fixture plus a macro log-volatility pushed to 50.
    //
    // Expect
    // ------
    // - variances()[t, 0] = exp(20) for the clipped entry; column 1 is the
    //   first unclassified series; covariance_at is diagonal; t = T is None.
    fn variances_are_ordered_and_clipped() {
        let f = fixture();
        let decomposed = decompose_volatility(
            f.eta_m.view(),
            f.eta_u.view(),
            f.eta_f.view(),
            f.h_m.view(),
            f.h_f.view(),
            &f.path,
        )
        .unwrap();
        let mut macro_vol = decomposed.macro_vol().to_owned();
        macro_vol[[0, 0]] = 50.0;
        let vol = TotalLogVolatility::new(
            macro_vol,
            decomposed.unclassified_vol().to_owned(),
            decomposed.financial_vol().to_owned(),
        )
        .unwrap();

        let var = vol.variances();
        let cov = vol.covariance_at(1).unwrap();

        assert_eq!(var.dim(), (4, 5));
        assert_relative_eq!(var[[0, 0]], 20.0_f64.exp(), max_relative = 1e-12);
        assert_relative_eq!(var[[2, 1]], vol.unclassified_vol()[[2, 0]].exp(), max_relative = 1e-12);
        assert_relative_eq!(var[[3, 4]], vol.financial_vol()[[3, 1]].exp(), max_relative = 1e-12);
        assert_eq!(cov.dim(), (5, 5));
        assert_relative_eq!(cov[[2, 2]], var[[1, 2]], max_relative = 1e-12);
        assert_eq!(cov[[0, 1]], 0.0);
        assert!(vol.covariance_at(4).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Mismatched lengths and path shapes are dimension errors.
    //
    // Given
    // -----
    // - h_f of length 3 for T = 4; a path with T = 3.
    //
    // Expect
    // ------
    // - `LengthMismatch { name: "h_f" }` and `SeriesShape { name: "classification" }`.
    fn decompose_rejects_shape_mismatches() {
        let f = fixture();
        let short_h = array![0.0, 0.0, 0.0];
        let short_path = ClassificationPath::constant(2, 3, Regime::Macro);

        let err_h = decompose_volatility(
            f.eta_m.view(),
            f.eta_u.view(),
            f.eta_f.view(),
            f.h_m.view(),
            short_h.view(),
            &f.path,
        )
        .unwrap_err();
        let err_path = decompose_volatility(
            f.eta_m.view(),
            f.eta_u.view(),
            f.eta_f.view(),
            f.h_m.view(),
            f.h_f.view(),
            &short_path,
        )
        .unwrap_err();

        assert!(matches!(err_h, SVMVARError::LengthMismatch { name: "h_f", .. }));
        assert!(matches!(err_path, SVMVARError::SeriesShape { name: "classification", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Group matrices with different numbers of periods cannot be combined
    // into a total log-volatility.
    //
    // Given
    // -----
    // - Macro and financial blocks of 3 rows, an unclassified block of 2 rows,
    //   all filled with 5.0.
    //
    // Expect
    // ------
    // - `SeriesShape { name: "unclassified_vol", expected: (3, 1), actual: (2, 1) }`.
    // - With matching rows every variance is e⁵.
    fn new_rejects_groups_with_different_lengths() {
        let five = |rows: usize| Array2::from_elem((rows, 1), 5.0);

        let err = TotalLogVolatility::new(five(3), five(2), five(3)).unwrap_err();
        let vol = TotalLogVolatility::new(five(3), five(3), five(3)).unwrap();

        assert_eq!(
            err,
            SVMVARError::SeriesShape { name: "unclassified_vol", expected: (3, 1), actual: (2, 1) }
        );
        for v in vol.variances().iter() {
            assert_relative_eq!(*v, 5.0_f64.exp(), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // The per-period covariance reads the same values as the full variance
    // matrix for every t.
    //
    // Given
    // -----
    // - The decomposed fixture (T = 4, n = 5).
    //
    // Expect
    // ------
    // - diag(covariance_at(t)) equals variances() row t exactly.
    fn covariance_at_matches_variance_rows() {
        let f = fixture();
        let vol = decompose_volatility(
            f.eta_m.view(),
            f.eta_u.view(),
            f.eta_f.view(),
            f.h_m.view(),
            f.h_f.view(),
            &f.path,
        )
        .unwrap();

        let var = vol.variances();

        for t in 0..vol.t_len() {
            let cov = vol.covariance_at(t).unwrap();
            assert_eq!(cov.diag(), var.row(t));
        }
    }
}
