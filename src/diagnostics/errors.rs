//! diagnostics::errors: error type for MCMC output diagnostics.
//!
//! Purpose
//! -------
//! Provide [`DiagnosticsError`] and the alias [`DiagnosticsResult`] for the
//! autocorrelation, Geweke, effective-sample-size and posterior-summary
//! routines, so malformed chains surface as values instead of panics or
//! silent NaNs.
//!
//! Conventions
//! -----------
//! - Indices are 0-based positions in the chain (or `(draw, parameter)`
//!   pairs for draw matrices).
//! - Messages are phrased as the constraint that was violated.

pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;

/// DiagnosticsError: failures of the chain diagnostics.
///
/// Variants
/// --------
/// - `EmptyChain`
///   No draws were supplied.
/// - `InsufficientData { len, required }`
///   The chain (or one of its Geweke windows) is too short.
/// - `NonFiniteDraw { index, value }`
///   A draw is NaN/±inf.
/// - `ZeroVariance`
///   The chain is constant, so autocorrelations or the Geweke z-score are
///   undefined.
/// - `InvalidFraction { name, value }`
///   A Geweke window fraction outside (0, 1).
/// - `FractionsOverlap { first, last }`
///   Geweke windows whose fractions sum above 1.
/// - `InvalidQuantile(q)`
///   A requested quantile outside [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticsError {
    //------ Chain validation ------
    EmptyChain,
    InsufficientData { len: usize, required: usize },
    NonFiniteDraw { index: usize, value: f64 },
    ZeroVariance,

    //------ Arguments ------
    InvalidFraction { name: &'static str, value: f64 },
    FractionsOverlap { first: f64, last: f64 },
    InvalidQuantile(f64),
}

impl std::error::Error for DiagnosticsError {}

impl std::fmt::Display for DiagnosticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticsError::EmptyChain => write!(f, "Chain must contain at least one draw."),
            DiagnosticsError::InsufficientData { len, required } => {
                write!(f, "Chain has {len} draws; at least {required} are required.")
            }
            DiagnosticsError::NonFiniteDraw { index, value } => {
                write!(f, "Draw {index} is non-finite: {value}.")
            }
            DiagnosticsError::ZeroVariance => {
                write!(f, "Chain has zero variance; the diagnostic is undefined.")
            }
            DiagnosticsError::InvalidFraction { name, value } => {
                write!(f, "Invalid {name} fraction: {value}. Must lie in (0, 1).")
            }
            DiagnosticsError::FractionsOverlap { first, last } => {
                write!(f, "Geweke windows overlap: first + last = {} > 1.", first + last)
            }
            DiagnosticsError::InvalidQuantile(q) => {
                write!(f, "Invalid quantile: {q}. Must lie in [0, 1].")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages embed the offending payload.
    //
    // Given
    // -----
    // - `InsufficientData { len: 3, required: 10 }` and `InvalidQuantile(1.5)`.
    //
    // Expect
    // ------
    // - Messages contain "3", "10" and "1.5".
    fn diagnostics_error_display_includes_payload() {
        // Arrange
        let short = DiagnosticsError::InsufficientData { len: 3, required: 10 };
        let quantile = DiagnosticsError::InvalidQuantile(1.5);

        // Act
        let short_msg = short.to_string();
        let quantile_msg = quantile.to_string();

        // Assert
        assert!(short_msg.contains('3') && short_msg.contains("10"), "Got: {short_msg}");
        assert!(quantile_msg.contains("1.5"), "Got: {quantile_msg}");
    }
}
