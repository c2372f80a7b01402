//! OI-SVMVAR coefficient blocks and the contemporaneous impact matrix.
//!
//! This module provides validated, owned containers for every coefficient
//! block the structural equations consume. Shapes are checked once at
//! construction against the number of variables `n`, so the mean and
//! likelihood engines can index without re-validating.
//!
//! ## What this module defines
//! - [`VARCoefficients`]: `B₁…B_p`, each n×n, `p ≥ 1`.
//! - [`VolInMeanCoefficients`]: `A₀…A_q`, each n×2, at least one matrix.
//! - [`HEquationCoefficients`]: `Φ₁…Φ_ph` (2×2) and `Ψ₁…Ψ_py` (2×n); either
//!   list may be empty.
//! - [`ContemporaneousImpact`]: the n×n matrix `B0` relating reduced-form
//!   residuals to structural shocks, `ε_t = B0 (y_t − μ_t)`.
//!
//! ## Stacked layout
//! Lag blocks can be converted to and from a single stacked matrix
//! `[M₁ M₂ …]` (matrices side by side). For the VAR block this is the n×np
//! layout used by the Minnesota prior and by the OLS fit, where column
//! `(ℓ − 1)·n + j` multiplies variable `j` at lag `ℓ`.
//!
//! ## Impact parameterization
//! Under the recursive identification scheme `B0` is unit lower-triangular
//! and its `n(n − 1)/2` strictly-lower entries are the free parameters,
//! read and written row by row: `(1,0), (2,0), (2,1), (3,0), …`.
//! [`ContemporaneousImpact::from_matrix`] also accepts an arbitrary square
//! matrix; singularity is only detected when the inverse is requested.
//!
//! ## Invariants validated by constructors
//! - every matrix has the block's shape and finite entries;
//! - the VAR block has at least one lag matrix;
//! - the volatility-in-mean block has at least `A₀`.
use crate::{
    linalg::{
        companion::{StationarityReport, check_stationarity, impulse_response},
        convert::{from_dmatrix, to_dmatrix},
    },
    numerical_stability::transformations::SINGULAR_TOL,
    svmvar::{
        core::validation::{validate_coefficient_block, validate_finite, validate_length},
        errors::{SVMVARError, SVMVARResult},
    },
};
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, s};

/// VAR lag matrices `B₁…B_p`.
#[derive(Debug, Clone, PartialEq)]
pub struct VARCoefficients {
    matrices: Vec<Array2<f64>>,
}

impl VARCoefficients {
    /// Validate `B₁…B_p` against `n`.
    ///
    /// # Errors
    /// - [`SVMVARError::EmptyCoefficients`] if `matrices` is empty.
    /// - [`SVMVARError::CoefficientShape`] if some `B_i` is not n×n.
    /// - [`SVMVARError::NonFiniteData`] for NaN/±inf coefficients.
    pub fn new(matrices: Vec<Array2<f64>>, n: usize) -> SVMVARResult<Self> {
        if matrices.is_empty() {
            return Err(SVMVARError::EmptyCoefficients { block: "B" });
        }
        validate_coefficient_block("B", &matrices, (n, n))?;
        Ok(VARCoefficients { matrices })
    }

    /// Split an n×np stacked matrix `[B₁ … B_p]` into lag matrices.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if `stacked` is not n×np.
    /// - As in [`VARCoefficients::new`].
    pub fn from_stacked(stacked: ArrayView2<f64>, p: usize) -> SVMVARResult<Self> {
        let n = stacked.nrows();
        let matrices = split_stacked("B (stacked)", stacked, n, n, p)?;
        Self::new(matrices, n)
    }

    /// Stacked n×np matrix `[B₁ … B_p]`.
    pub fn to_stacked(&self) -> Array2<f64> {
        stack(&self.matrices)
    }

    pub fn matrices(&self) -> &[Array2<f64>] {
        &self.matrices
    }

    /// Lag order p.
    pub fn p(&self) -> usize {
        self.matrices.len()
    }

    /// Number of variables n.
    pub fn n(&self) -> usize {
        self.matrices[0].nrows()
    }

    /// Spectral radius of the companion matrix and the stationarity verdict.
    pub fn stationarity(&self) -> SVMVARResult<StationarityReport> {
        Ok(check_stationarity(&self.matrices)?)
    }

    /// Structural impulse responses (`horizon × n × n`) under `impact`.
    ///
    /// # Errors
    /// - [`SVMVARError::SingularImpactMatrix`] if `impact` cannot be inverted.
    /// - [`SVMVARError::Linalg`] if `impact` is not n×n.
    pub fn impulse_response(
        &self, impact: &ContemporaneousImpact, horizon: usize,
    ) -> SVMVARResult<Array3<f64>> {
        let b0_inv = impact.inverse()?;
        Ok(impulse_response(&self.matrices, b0_inv.view(), horizon)?)
    }
}

/// Volatility-in-mean matrices `A₀…A_q`, mapping `(h_m, h_f)` into the mean.
#[derive(Debug, Clone, PartialEq)]
pub struct VolInMeanCoefficients {
    matrices: Vec<Array2<f64>>,
}

impl VolInMeanCoefficients {
    /// Validate `A₀…A_q` against `n`.
    ///
    /// # Errors
    /// - [`SVMVARError::EmptyCoefficients`] if `matrices` is empty.
    /// - [`SVMVARError::CoefficientShape`] if some `A_j` is not n×2.
    pub fn new(matrices: Vec<Array2<f64>>, n: usize) -> SVMVARResult<Self> {
        if matrices.is_empty() {
            return Err(SVMVARError::EmptyCoefficients { block: "A" });
        }
        validate_coefficient_block("A", &matrices, (n, 2))?;
        Ok(VolInMeanCoefficients { matrices })
    }

    /// All-zero block with `q + 1` matrices (no volatility-in-mean effect).
    pub fn zeros(n: usize, q: usize) -> Self {
        VolInMeanCoefficients { matrices: vec![Array2::zeros((n, 2)); q + 1] }
    }

    /// Split an n×2(q+1) stacked matrix `[A₀ … A_q]`.
    pub fn from_stacked(stacked: ArrayView2<f64>, q: usize) -> SVMVARResult<Self> {
        let n = stacked.nrows();
        let matrices = split_stacked("A (stacked)", stacked, n, 2, q + 1)?;
        Self::new(matrices, n)
    }

    /// Stacked n×2(q+1) matrix `[A₀ … A_q]`.
    pub fn to_stacked(&self) -> Array2<f64> {
        stack(&self.matrices)
    }

    pub fn matrices(&self) -> &[Array2<f64>] {
        &self.matrices
    }

    /// Highest lag q (the block holds q + 1 matrices).
    pub fn q(&self) -> usize {
        self.matrices.len() - 1
    }
}

/// Coefficients of the common-factor equation
/// `h_t = Σ Φ_i h_{t−i} + Σ Ψ_j y_{t−j} + ε_h`.
#[derive(Debug, Clone, PartialEq)]
pub struct HEquationCoefficients {
    phi: Vec<Array2<f64>>,
    psi: Vec<Array2<f64>>,
}

impl HEquationCoefficients {
    /// Validate `Φ₁…Φ_ph` (2×2) and `Ψ₁…Ψ_py` (2×n).
    ///
    /// # Errors
    /// - [`SVMVARError::CoefficientShape`] for the first mis-shaped matrix.
    pub fn new(phi: Vec<Array2<f64>>, psi: Vec<Array2<f64>>, n: usize) -> SVMVARResult<Self> {
        validate_coefficient_block("Phi", &phi, (2, 2))?;
        validate_coefficient_block("Psi", &psi, (2, n))?;
        Ok(HEquationCoefficients { phi, psi })
    }

    pub fn phi(&self) -> &[Array2<f64>] {
        &self.phi
    }

    pub fn psi(&self) -> &[Array2<f64>] {
        &self.psi
    }

    pub fn ph(&self) -> usize {
        self.phi.len()
    }

    pub fn py(&self) -> usize {
        self.psi.len()
    }
}

/// Contemporaneous impact matrix `B0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContemporaneousImpact {
    b0: Array2<f64>,
}

impl ContemporaneousImpact {
    /// `B0 = I`: reduced-form and structural shocks coincide.
    pub fn identity(n: usize) -> Self {
        ContemporaneousImpact { b0: Array2::eye(n) }
    }

    /// Unit lower-triangular `B0` from its free parameters (row-major over
    /// the strictly-lower triangle).
    ///
    /// # Errors
    /// - [`SVMVARError::LengthMismatch`] unless `free.len() == n(n − 1)/2`.
    /// - [`SVMVARError::NonFiniteData`] for NaN/±inf parameters.
    pub fn from_free_params(free: ArrayView1<f64>, n: usize) -> SVMVARResult<Self> {
        validate_length("B0 free parameters", free.len(), n * n.saturating_sub(1) / 2)?;
        validate_finite("B0 free parameters", free.insert_axis(ndarray::Axis(0)))?;
        let mut b0 = Array2::eye(n);
        let mut k = 0;
        for i in 1..n {
            for j in 0..i {
                b0[[i, j]] = free[k];
                k += 1;
            }
        }
        Ok(ContemporaneousImpact { b0 })
    }

    /// Wrap an arbitrary square `B0`.
    ///
    /// # Errors
    /// - [`SVMVARError::SeriesShape`] if `b0` is not square.
    /// - [`SVMVARError::NonFiniteData`] for NaN/±inf entries.
    pub fn from_matrix(b0: Array2<f64>) -> SVMVARResult<Self> {
        let (rows, cols) = b0.dim();
        if rows != cols {
            return Err(SVMVARError::SeriesShape {
                name: "B0",
                expected: (rows, rows),
                actual: (rows, cols),
            });
        }
        validate_finite("B0", b0.view())?;
        Ok(ContemporaneousImpact { b0 })
    }

    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.b0.view()
    }

    pub fn n(&self) -> usize {
        self.b0.nrows()
    }

    /// Strictly-lower entries of `B0`, row by row.
    pub fn free_params(&self) -> Array1<f64> {
        let n = self.n();
        (1..n).flat_map(|i| (0..i).map(move |j| (i, j))).map(|(i, j)| self.b0[[i, j]]).collect()
    }

    /// `B0⁻¹`, the matrix consumed by the likelihood and impulse responses.
    ///
    /// # Errors
    /// - [`SVMVARError::SingularImpactMatrix`] if `|det B0| < SINGULAR_TOL`
    ///   or the LU inverse fails.
    pub fn inverse(&self) -> SVMVARResult<Array2<f64>> {
        let lu = to_dmatrix(self.b0.view()).lu();
        let determinant = lu.determinant();
        if !determinant.is_finite() || determinant.abs() < SINGULAR_TOL {
            return Err(SVMVARError::SingularImpactMatrix { determinant });
        }
        let inv = lu.try_inverse().ok_or(SVMVARError::SingularImpactMatrix { determinant })?;
        Ok(from_dmatrix(&inv))
    }
}

// ---- Helper methods ----

fn split_stacked(
    name: &'static str, stacked: ArrayView2<f64>, rows: usize, cols: usize, count: usize,
) -> SVMVARResult<Vec<Array2<f64>>> {
    let expected = (rows, cols * count);
    if stacked.dim() != expected {
        return Err(SVMVARError::SeriesShape { name, expected, actual: stacked.dim() });
    }
    Ok((0..count).map(|k| stacked.slice(s![.., k * cols..(k + 1) * cols]).to_owned()).collect())
}

// Blocks are validated non-empty with a common shape, so every slot is
// written exactly once.
fn stack(matrices: &[Array2<f64>]) -> Array2<f64> {
    let (rows, cols) = matrices.first().map_or((0, 0), |m| m.dim());
    let mut stacked = Array2::zeros((rows, cols * matrices.len()));
    for (k, m) in matrices.iter().enumerate() {
        stacked.slice_mut(s![.., k * cols..(k + 1) * cols]).assign(m);
    }
    stacked
}
