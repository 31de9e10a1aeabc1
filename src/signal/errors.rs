#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

/// Result alias for signal-model operations.
pub type SignalResult<T> = Result<T, SignalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    // ---- Shape ----
    /// Paired input sequences must share a length.
    DimensionMismatch {
        quantity: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Input sequences must be non-empty.
    EmptyInput {
        quantity: &'static str,
    },

    // ---- Values ----
    /// Backscatter weights must be finite and strictly positive.
    InvalidWeight {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Surface distances must be finite and non-negative.
    InvalidDistance {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Wavelengths must be finite and strictly positive.
    InvalidWavelength {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Phase variances must be finite and non-negative.
    InvalidPhaseVariance {
        index: usize,
        value: f64,
        reason: &'static str,
    },
}

impl std::error::Error for SignalError {}

impl std::fmt::Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            SignalError::DimensionMismatch { quantity, expected, actual } => {
                write!(f, "Dimension mismatch for {quantity}: expected {expected}, actual {actual}")
            }
            SignalError::EmptyInput { quantity } => {
                write!(f, "Empty input: {quantity} must contain at least one element")
            }

            // ---- Values ----
            SignalError::InvalidWeight { index, value, reason } => {
                write!(f, "Invalid weight at index {index}: {value}: {reason}")
            }
            SignalError::InvalidDistance { index, value, reason } => {
                write!(f, "Invalid distance at index {index}: {value}: {reason}")
            }
            SignalError::InvalidWavelength { index, value, reason } => {
                write!(f, "Invalid wavelength at index {index}: {value}: {reason}")
            }
            SignalError::InvalidPhaseVariance { index, value, reason } => {
                write!(f, "Invalid phase variance at index {index}: {value}: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<SignalError> for PyErr {
    fn from(err: SignalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
