//! linalg::convert: copies between `ndarray` and `nalgebra` matrices.
//!
//! The model layer speaks `ndarray`; factorizations (Cholesky, LU, SVD,
//! eigen) come from `nalgebra`. These helpers are the only place the two
//! storage orders meet. `DMatrix` is column-major, so copies are written
//! column by column.
use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};

/// Copy an `ndarray` matrix into a freshly allocated `DMatrix`.
pub fn to_dmatrix(a: ArrayView2<f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    let mut out = DMatrix::<f64>::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            out[(i, j)] = a[[i, j]];
        }
    }
    out
}

/// Copy a `DMatrix` back into an owned `Array2`.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
