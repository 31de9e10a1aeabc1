//! milp::problem — backend-independent mixed-integer linear program container.
//!
//! Purpose
//! -------
//! Hold a minimization MILP as plain data: per-variable objective
//! coefficients, domains, and bounds, plus a list of linear constraints.
//! The container validates everything at assembly time so solver
//! implementations can trust the indices and coefficients they are handed.
//!
//! Key behaviors
//! -------------
//! - `add_continuous` / `add_integer` register a variable and hand back an
//!   opaque [`VarId`] for later reference.
//! - `add_constraint` records a linear row over previously added variables.
//! - Accessors expose the assembled data as slices; nothing is mutable after
//!   assembly except through the add methods.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is always minimized; callers wanting maximization negate
//!   their coefficients.
//! - Objective and constraint coefficients are finite; bounds are never NaN
//!   (infinite bounds are allowed and mean "unbounded on that side").
//! - Crossed bounds (`lower > upper`) are **not** rejected here: they encode
//!   an infeasible box and must surface as [`MilpError::Infeasible`] from a
//!   solve, not as an assembly error.
//!
//! Downstream usage
//! ----------------
//! - [`crate::ranging::resolver::assemble`] builds the ambiguity-resolution
//!   MILP through this API.
//! - [`crate::optimization::milp::branch_bound::BranchAndBound`] consumes the
//!   accessors to drive its LP relaxations.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover the builder's validation paths and the accessor
//!   contract; solve behavior is tested in `branch_bound`.
use crate::optimization::errors::{MilpError, MilpResult};

/// Opaque handle to a variable registered in a [`MilpProblem`].
///
/// Valid only for the problem that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in the problem's column order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Continuous,
    Integer,
}

/// One linear constraint row: `sum(coeff · var) op rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub terms: Vec<(VarId, f64)>,
    pub op: RelOp,
    pub rhs: f64,
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Le,
    Ge,
    Eq,
}

/// A validated minimization MILP.
///
/// Columns are stored in registration order; [`VarId`] values index into
/// that order. See the module docs for the invariants accessors may assume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpProblem {
    objective: Vec<f64>,
    domains: Vec<VarDomain>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl MilpProblem {
    /// Create an empty minimization problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a continuous variable.
    ///
    /// # Parameters
    /// - `obj_coeff`: objective coefficient, must be finite.
    /// - `lower`, `upper`: box bounds; `±∞` allowed, NaN rejected. A crossed
    ///   box is accepted and yields infeasibility at solve time.
    ///
    /// # Errors
    /// - [`MilpError::InvalidObjective`] for a non-finite coefficient.
    /// - [`MilpError::InvalidBounds`] if either bound is NaN.
    pub fn add_continuous(&mut self, obj_coeff: f64, lower: f64, upper: f64) -> MilpResult<VarId> {
        self.add_var(VarDomain::Continuous, obj_coeff, lower, upper)
    }

    /// Register an integer variable.
    ///
    /// Same contract as [`MilpProblem::add_continuous`]; fractional bounds
    /// are accepted and tightened to the enclosed integer range by the
    /// solver.
    pub fn add_integer(&mut self, obj_coeff: f64, lower: f64, upper: f64) -> MilpResult<VarId> {
        self.add_var(VarDomain::Integer, obj_coeff, lower, upper)
    }

    fn add_var(
        &mut self, domain: VarDomain, obj_coeff: f64, lower: f64, upper: f64,
    ) -> MilpResult<VarId> {
        let index = self.objective.len();
        if !obj_coeff.is_finite() {
            return Err(MilpError::InvalidObjective {
                index,
                value: obj_coeff,
                reason: "Objective coefficients must be finite.",
            });
        }
        if lower.is_nan() || upper.is_nan() {
            return Err(MilpError::InvalidBounds {
                lower,
                upper,
                reason: "Bounds must not be NaN.",
            });
        }
        self.objective.push(obj_coeff);
        self.domains.push(domain);
        self.lower.push(lower);
        self.upper.push(upper);
        Ok(VarId(index))
    }

    /// Record a linear constraint over previously registered variables.
    ///
    /// # Errors
    /// - [`MilpError::EmptyConstraint`] for an empty term list.
    /// - [`MilpError::UnknownVariable`] if a term references a variable this
    ///   problem never registered.
    /// - [`MilpError::InvalidCoefficient`] / [`MilpError::InvalidRhs`] for
    ///   non-finite numbers.
    pub fn add_constraint(
        &mut self, terms: Vec<(VarId, f64)>, op: RelOp, rhs: f64,
    ) -> MilpResult<()> {
        if terms.is_empty() {
            return Err(MilpError::EmptyConstraint);
        }
        for &(var, coeff) in &terms {
            if var.index() >= self.num_vars() {
                return Err(MilpError::UnknownVariable {
                    index: var.index(),
                    num_vars: self.num_vars(),
                });
            }
            if !coeff.is_finite() {
                return Err(MilpError::InvalidCoefficient {
                    index: var.index(),
                    value: coeff,
                    reason: "Constraint coefficients must be finite.",
                });
            }
        }
        if !rhs.is_finite() {
            return Err(MilpError::InvalidRhs {
                value: rhs,
                reason: "Right-hand sides must be finite.",
            });
        }
        self.constraints.push(LinearConstraint { terms, op, rhs });
        Ok(())
    }

    /// Number of registered variables.
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Number of recorded constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective coefficients in column order.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Variable domains in column order.
    pub fn domains(&self) -> &[VarDomain] {
        &self.domains
    }

    /// Lower bounds in column order.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds in column order.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Recorded constraint rows.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }
}
