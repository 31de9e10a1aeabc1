//! milp — mixed-integer linear programming for ambiguity resolution.
//!
//! Purpose
//! -------
//! House the generic MILP layer the resolver sits on: a problem container
//! ([`MilpProblem`]), the solver seam ([`MilpSolve`]), and the default
//! branch-and-bound engine ([`BranchAndBound`]) backed by microlp LP
//! relaxations.
//!
//! Key behaviors
//! -------------
//! - Problems are assembled column by column (`add_continuous`,
//!   `add_integer`) and row by row (`add_constraint`); assembly validates
//!   shapes and finiteness, never feasibility.
//! - `MilpSolve::solve` returns `Ok` only when an integer-feasible
//!   incumbent exists; infeasibility and budget exhaustion are errors.
//! - [`MilpStatus`] records whether the incumbent was certified optimal or
//!   merely feasible when the node budget ran out.
//!
//! Invariants & assumptions
//! ------------------------
//! - Minimization only; callers negate objectives to maximize.
//! - Crossed variable bounds are accepted at assembly and surface as
//!   [`errors::MilpError::Infeasible`](crate::optimization::errors::MilpError)
//!   at solve time.
//!
//! Downstream usage
//! ----------------
//! - [`crate::ranging`] assembles its L1 fit as a [`MilpProblem`] and runs
//!   it through any [`MilpSolve`] implementation.
pub mod branch_bound;
pub mod problem;
pub mod solver;

pub use branch_bound::BranchAndBound;
pub use problem::{LinearConstraint, MilpProblem, RelOp, VarDomain, VarId};
pub use solver::{MilpSolution, MilpSolve, MilpStatus};
