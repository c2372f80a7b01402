//! linalg::vectorize: column-stacking and Kronecker products.
//!
//! `vec(A)` stacks the columns of an m×n matrix into a vector of length mn,
//! matching the convention used by the Minnesota prior
//! (`vec(B) ~ N(vec(M), V)`) and by `vec(ABC) = (Cᵀ ⊗ A) vec(B)`.
use crate::linalg::errors::{LinalgError, LinalgResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Stack the columns of `a` into one vector (column-major order).
pub fn vectorize(a: ArrayView2<f64>) -> Array1<f64> {
    a.t().iter().copied().collect()
}

/// Inverse of [`vectorize`]: rebuild a `rows × cols` matrix from a
/// column-stacked vector.
///
/// # Errors
/// `LinalgError::LengthMismatch` when `v.len() != rows * cols`.
pub fn unvectorize(v: ArrayView1<f64>, rows: usize, cols: usize) -> LinalgResult<Array2<f64>> {
    let expected = rows * cols;
    if v.len() != expected {
        return Err(LinalgError::LengthMismatch { expected, actual: v.len() });
    }
    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| v[j * rows + i]))
}

/// Kronecker product `A ⊗ B` with shape `(ma·mb) × (na·nb)`.
///
/// Block `(i, j)` of the result is `a[i, j] · B`.
pub fn kronecker(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Array2<f64> {
    let (ma, na) = a.dim();
    let (mb, nb) = b.dim();
    let mut out = Array2::<f64>::zeros((ma * mb, na * nb));
    for ((i, j), &aij) in a.indexed_iter() {
        let mut block = out.slice_mut(ndarray::s![i * mb..(i + 1) * mb, j * nb..(j + 1) * nb]);
        block.assign(&(&b * aij));
    }
    out
}
