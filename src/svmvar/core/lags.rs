//! Lag builder shared by the observation and volatility equations.
//!
//! Convention: lag slot `ℓ` holds the `(ℓ + 1)`-period lag, so slot 0 is
//! `x_{t−1}`, never `x_t`. Rows without enough history are zero; there is
//! no wraparound.
use ndarray::{Array3, ArrayView2, s};

/// Build the T×k×p lag tensor of a T×k base matrix.
///
/// Parameters
/// ----------
/// - `base`: `ArrayView2<f64>`
///   T×k matrix, rows are time.
/// - `p`: `usize`
///   Number of lags. `p = 0` yields a T×k×0 tensor.
///
/// Returns
/// -------
/// `Array3<f64>` with `out[[t, i, ℓ]] = base[[t − ℓ − 1, i]]` when `t > ℓ`
/// and `0.0` otherwise.
pub fn build_lags(base: ArrayView2<f64>, p: usize) -> Array3<f64> {
    let (t_len, k) = base.dim();
    let mut out = Array3::<f64>::zeros((t_len, k, p));
    for l in 0..p {
        if l + 1 >= t_len {
            break;
        }
        out.slice_mut(s![l + 1.., .., l]).assign(&base.slice(s![..t_len - l - 1, ..]));
    }
    out
}
