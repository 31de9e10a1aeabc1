#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

use crate::optimization::errors::MilpError;
use crate::ranging::outcome::Resolution;

/// Result alias for ambiguity-resolution operations.
pub type RangingResult<T> = Result<T, RangingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RangingError {
    // ---- Shape ----
    /// Observation-indexed sequences must share a length.
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
    /// Observations must have finite real and imaginary parts.
    InvalidObservation {
        index: usize,
        re: f64,
        im: f64,
        reason: &'static str,
    },

    /// Wavelengths must be finite and strictly positive.
    InvalidWavelength {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Phase variances must be finite and strictly positive here; the
    /// inverse-standard-deviation weight is undefined at zero.
    InvalidPhaseVariance {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Configuration ----
    /// The node budget must be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    /// A cycle-count constraint addressed an index outside `[0, n_obs)`.
    ConstraintIndexOutOfRange {
        cycle_index: usize,
        n_obs: usize,
    },

    /// Constraint bounds must be finite.
    InvalidConstraintBound {
        bound: f64,
        reason: &'static str,
    },

    // ---- Solve ----
    /// The constraint set admits no solution.
    Infeasible,

    /// Node budget exhausted before any feasible incumbent was found.
    SolverTimeout {
        nodes_processed: usize,
    },

    /// Node budget exhausted with a feasible but uncertified incumbent.
    /// The incumbent travels with the error so callers can accept it
    /// explicitly instead of treating it as a success.
    Suboptimal {
        resolution: Box<Resolution>,
    },

    /// Wrapper for failures inside the MILP engine.
    Solver {
        text: String,
    },

    // ---- Extraction ----
    /// The engine returned a cycle column too far from an integer.
    NonIntegralCycle {
        index: usize,
        value: f64,
    },

    /// A recovered cycle count does not fit a 64-bit integer.
    CycleOutOfRange {
        index: usize,
        value: f64,
    },
}

impl std::error::Error for RangingError {}

impl std::fmt::Display for RangingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            RangingError::DimensionMismatch { quantity, expected, actual } => {
                write!(f, "Dimension mismatch for {quantity}: expected {expected}, actual {actual}")
            }
            RangingError::EmptyInput { quantity } => {
                write!(f, "Empty input: {quantity} must contain at least one element")
            }

            // ---- Values ----
            RangingError::InvalidObservation { index, re, im, reason } => {
                write!(f, "Invalid observation at index {index}: {re}+{im}i: {reason}")
            }
            RangingError::InvalidWavelength { index, value, reason } => {
                write!(f, "Invalid wavelength at index {index}: {value}: {reason}")
            }
            RangingError::InvalidPhaseVariance { index, value, reason } => {
                write!(f, "Invalid phase variance at index {index}: {value}: {reason}")
            }

            // ---- Configuration ----
            RangingError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid max_iter {max_iter}: {reason}")
            }
            RangingError::ConstraintIndexOutOfRange { cycle_index, n_obs } => {
                write!(
                    f,
                    "Constraint addresses cycle count {cycle_index}, but only {n_obs} \
                     observations exist"
                )
            }
            RangingError::InvalidConstraintBound { bound, reason } => {
                write!(f, "Invalid constraint bound {bound}: {reason}")
            }

            // ---- Solve ----
            RangingError::Infeasible => {
                write!(f, "Constraint set is infeasible: no distance satisfies every bound")
            }
            RangingError::SolverTimeout { nodes_processed } => {
                write!(
                    f,
                    "Node budget exhausted after {nodes_processed} nodes without a feasible \
                     incumbent; retry with a larger max_iter"
                )
            }
            RangingError::Suboptimal { resolution } => {
                write!(
                    f,
                    "Node budget exhausted with an uncertified incumbent at distance {:.6} \
                     ({} nodes); accept it explicitly or retry with a larger max_iter",
                    resolution.distance, resolution.nodes_processed
                )
            }
            RangingError::Solver { text } => {
                write!(f, "MILP engine error: {text}")
            }

            // ---- Extraction ----
            RangingError::NonIntegralCycle { index, value } => {
                write!(f, "Cycle count {index} came back non-integral from the engine: {value}")
            }
            RangingError::CycleOutOfRange { index, value } => {
                write!(f, "Cycle count {index} does not fit a 64-bit integer: {value}")
            }
        }
    }
}

/// Engine failures the resolver does not interpret are passed through;
/// infeasibility and budget exhaustion map onto their ranging-level
/// meanings. `MilpStatus::Feasible` is handled at the call site because it
/// needs the extracted incumbent, not the raw engine error.
impl From<MilpError> for RangingError {
    fn from(err: MilpError) -> RangingError {
        match err {
            MilpError::Infeasible => RangingError::Infeasible,
            MilpError::IterationLimit { nodes_processed } => {
                RangingError::SolverTimeout { nodes_processed }
            }
            other => RangingError::Solver { text: other.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<RangingError> for PyErr {
    fn from(err: RangingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
