//! Unified error handling for the linear-algebra utilities.
//!
//! This module defines `LinalgError`, the error type returned by the
//! positive-definiteness tools, (un)vectorization, companion-form, impulse
//! response and OLS routines. An alias `LinalgResult<T>` standardizes the
//! return type across `linalg`. Each variant maps onto the crate-wide
//! [`ErrorKind`] taxonomy through [`LinalgError::kind`].
use crate::svmvar::errors::ErrorKind;

/// Unified error type for linear-algebra routines.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    // ---- Shapes ----
    /// A square matrix was required.
    NotSquare { rows: usize, cols: usize },

    /// Two operands (or an operand and a declared shape) disagree.
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// A vector does not have the declared length.
    LengthMismatch { expected: usize, actual: usize },

    /// An empty coefficient list or matrix where content is required.
    EmptyInput { context: &'static str },

    /// Not enough observations for the requested regression.
    InsufficientObservations { t_len: usize, required: usize },

    // ---- Numerical ----
    /// A matrix that must be inverted or factorized is singular.
    Singular { context: &'static str },

    /// Nearest-PD repair did not reach a positive-definite matrix.
    RepairDidNotConverge { iterations: usize, min_eigenvalue: f64 },

    /// Non-finite entries where finite input is required.
    NonFinite { context: &'static str },
}

pub type LinalgResult<T> = Result<T, LinalgError>;

impl LinalgError {
    /// Map the variant onto the Dimension / Numerical taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinalgError::NotSquare { .. }
            | LinalgError::ShapeMismatch { .. }
            | LinalgError::LengthMismatch { .. }
            | LinalgError::EmptyInput { .. }
            | LinalgError::InsufficientObservations { .. } => ErrorKind::Dimension,
            LinalgError::Singular { .. }
            | LinalgError::RepairDidNotConverge { .. }
            | LinalgError::NonFinite { .. } => ErrorKind::Numerical,
        }
    }
}

impl std::error::Error for LinalgError {}

impl std::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shapes ----
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "Linalg Error: expected a square matrix, got {rows}x{cols}")
            }
            LinalgError::ShapeMismatch { expected, actual } => write!(
                f,
                "Linalg Error: expected shape {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            LinalgError::LengthMismatch { expected, actual } => {
                write!(f, "Linalg Error: expected length {expected}, got {actual}")
            }
            LinalgError::EmptyInput { context } => {
                write!(f, "Linalg Error: empty input ({context})")
            }
            LinalgError::InsufficientObservations { t_len, required } => write!(
                f,
                "Linalg Error: {t_len} observations available, at least {required} required"
            ),

            // ---- Numerical ----
            LinalgError::Singular { context } => {
                write!(f, "Linalg Error: singular matrix ({context})")
            }
            LinalgError::RepairDidNotConverge { iterations, min_eigenvalue } => write!(
                f,
                "Linalg Error: nearest-PD repair stopped after {iterations} iterations \
                 (min eigenvalue {min_eigenvalue:e})"
            ),
            LinalgError::NonFinite { context } => {
                write!(f, "Linalg Error: non-finite entries ({context})")
            }
        }
    }
}
