//! diagnostics::validation: shared guards for chain inputs.
use crate::diagnostics::errors::{DiagnosticsError, DiagnosticsResult};

/// Require a non-empty chain of at least `required` finite draws.
///
/// # Errors
/// - [`DiagnosticsError::EmptyChain`] for an empty slice.
/// - [`DiagnosticsError::InsufficientData`] if `chain.len() < required`.
/// - [`DiagnosticsError::NonFiniteDraw`] for the first NaN/±inf draw.
pub fn validate_chain(chain: &[f64], required: usize) -> DiagnosticsResult<()> {
    if chain.is_empty() {
        return Err(DiagnosticsError::EmptyChain);
    }
    if chain.len() < required {
        return Err(DiagnosticsError::InsufficientData { len: chain.len(), required });
    }
    match chain.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DiagnosticsError::NonFiniteDraw { index, value: chain[index] }),
        None => Ok(()),
    }
}

/// Arithmetic mean and population variance (`1/n` denominator).
pub(crate) fn mean_and_variance(x: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var)
}
