/// Result alias for MILP engine operations.
pub type MilpResult<T> = Result<T, MilpError>;

#[derive(Debug, Clone, PartialEq)]
pub enum MilpError {
    // ---- Problem assembly ----
    /// Objective coefficients must be finite.
    InvalidObjective {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Variable bounds must not be NaN (infinities are allowed).
    InvalidBounds {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    /// A constraint referenced a variable the problem does not define.
    UnknownVariable {
        index: usize,
        num_vars: usize,
    },

    /// Constraints must reference at least one variable.
    EmptyConstraint,

    /// Constraint coefficients must be finite.
    InvalidCoefficient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Constraint right-hand sides must be finite.
    InvalidRhs {
        value: f64,
        reason: &'static str,
    },

    // ---- Solve ----
    /// The node budget must be positive.
    InvalidNodeBudget {
        budget: usize,
        reason: &'static str,
    },

    /// The constraint set admits no solution.
    Infeasible,

    /// The objective can decrease without bound.
    Unbounded,

    /// Node budget exhausted before any integer-feasible point was found.
    IterationLimit {
        nodes_processed: usize,
    },

    /// Wrapper for failures inside the LP relaxation backend.
    Backend {
        text: String,
    },
}

impl std::error::Error for MilpError {}

impl std::fmt::Display for MilpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Problem assembly ----
            MilpError::InvalidObjective { index, value, reason } => {
                write!(f, "Invalid objective coefficient for variable {index}: {value}: {reason}")
            }
            MilpError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid variable bounds [{lower}, {upper}]: {reason}")
            }
            MilpError::UnknownVariable { index, num_vars } => {
                write!(f, "Unknown variable {index}: the problem defines {num_vars} variables")
            }
            MilpError::EmptyConstraint => {
                write!(f, "Constraint must reference at least one variable")
            }
            MilpError::InvalidCoefficient { index, value, reason } => {
                write!(f, "Invalid coefficient for variable {index}: {value}: {reason}")
            }
            MilpError::InvalidRhs { value, reason } => {
                write!(f, "Invalid constraint right-hand side {value}: {reason}")
            }

            // ---- Solve ----
            MilpError::InvalidNodeBudget { budget, reason } => {
                write!(f, "Invalid node budget {budget}: {reason}")
            }
            MilpError::Infeasible => {
                write!(f, "Problem is infeasible: the constraint set admits no solution")
            }
            MilpError::Unbounded => {
                write!(f, "Problem is unbounded: the objective can decrease without bound")
            }
            MilpError::IterationLimit { nodes_processed } => {
                write!(
                    f,
                    "Node budget exhausted after {nodes_processed} nodes without an \
                     integer-feasible incumbent"
                )
            }
            MilpError::Backend { text } => {
                write!(f, "LP backend error: {text}")
            }
        }
    }
}
