//! optimization — MILP stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the generic optimization layer the ranging resolver sits on:
//! a mixed-integer linear program container, a solver seam, a
//! branch-and-bound engine backed by microlp LP relaxations, and a single
//! error/result surface. Callers assemble a problem, pick an engine, and
//! obtain variable assignments and diagnostics without touching backend
//! solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a column/row assembly API for **minimization MILPs**
//!   (`milp::problem`), with shape and finiteness validation at assembly
//!   time.
//! - Define the solver seam (`milp::solver::MilpSolve`) so engines are
//!   swappable; ship depth-first branch and bound
//!   (`milp::branch_bound::BranchAndBound`) as the default engine.
//! - Normalize assembly mistakes, infeasibility, budget exhaustion, and
//!   backend failures into a single enum (`errors::MilpError`) with a
//!   common result alias (`MilpResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Problems are minimized; callers negate objective coefficients to
//!   maximize.
//! - Assembly validates shapes, never feasibility: crossed bounds and
//!   contradictory rows are accepted and surface as
//!   `MilpError::Infeasible` at solve time.
//! - `MilpSolve::solve` returns `Ok` only when an integer-feasible
//!   incumbent exists; every failure mode is an error, not a panic.
//!
//! Conventions
//! -----------
//! - Variables are addressed by opaque `VarId` handles issued at assembly;
//!   solutions are indexed with the same handles.
//! - Node budgets count LP relaxation solves, including heuristic
//!   re-solves, so runtime scales predictably with the budget.
//! - This module and its submodules avoid I/O; the only output is the
//!   optional progress reporting the engine prints when configured
//!   verbose.
//!
//! Downstream usage
//! ----------------
//! - `ranging::resolver` assembles the weighted L1 phase fit as a
//!   `MilpProblem` and runs it through any `MilpSolve` implementation.
//! - Front-ends import the curated surface via `optimization::prelude::*`
//!   or depend directly on the `milp` submodule when they want the full
//!   assembly API.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `milp::problem`: assembly validation and accessor behavior.
//!   - `milp::branch_bound`: LP passthrough, branching, infeasibility,
//!     bound tightening, and budget exhaustion outcomes.
//!   - `errors`: display formatting of the error surface.
//! - Higher-level integration tests exercise the resolver end to end,
//!   verifying that infeasible constraint sets and exhausted budgets
//!   surface as sensible errors and that successful runs produce stable
//!   resolutions.

pub mod errors;
pub mod milp;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use multiwave_ranging::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{MilpError, MilpResult};
    pub use super::milp::{
        BranchAndBound, LinearConstraint, MilpProblem, MilpSolution, MilpSolve, MilpStatus,
        RelOp, VarDomain, VarId,
    };
}
