//! Solver seam for mixed-integer linear programs.
//!
//! - [`MilpSolve`]: capability trait implemented by MILP engines.
//! - [`MilpSolution`]: assignment plus objective and search diagnostics.
//! - [`MilpStatus`]: certification level of a returned solution.
//!
//! Convention: a solve returns `Ok` only when an integer-feasible assignment
//! exists. Everything else is a typed error: [`MilpError::Infeasible`] when
//! the constraint set admits no solution, [`MilpError::IterationLimit`] when
//! the node budget ran out before any incumbent was found. A budget that runs
//! out *after* an incumbent was found yields `Ok` with
//! [`MilpStatus::Feasible`], so callers can tell certified optima from
//! best-effort incumbents.
use crate::optimization::errors::MilpResult;
use crate::optimization::milp::problem::{MilpProblem, VarId};

/// Certification level of a returned assignment.
///
/// Variants:
/// - `Optimal`: every open branch was explored or pruned; the assignment is
///   a proven optimum (up to the engine's gap tolerance).
/// - `Feasible`: the node budget expired with branches still open; the
///   assignment is the best incumbent found and may be suboptimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilpStatus {
    Optimal,
    Feasible,
}

/// Integer-feasible assignment returned by a [`MilpSolve`] engine.
///
/// Fields:
/// - `values`: one value per problem column, in registration order. Integer
///   columns are integral within the engine's integrality tolerance.
/// - `objective`: objective value of `values`.
/// - `status`: certification level; see [`MilpStatus`].
/// - `nodes_processed`: LP relaxations solved while searching.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    pub values: Vec<f64>,
    pub objective: f64,
    pub status: MilpStatus,
    pub nodes_processed: usize,
}

impl MilpSolution {
    /// Value assigned to `var`.
    ///
    /// # Panics
    /// Panics if `var` does not belong to the problem this solution answers;
    /// pairing solutions with foreign [`VarId`]s is a caller bug.
    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }
}

/// Capability trait for mixed-integer linear programming engines.
///
/// Implementations must honor `node_budget` as an upper bound on LP
/// relaxation solves and follow the `Ok`/`Err` convention documented at the
/// module level. The resolver depends only on this trait, so tests can
/// substitute a scripted fake for the real engine.
pub trait MilpSolve {
    /// Solve `problem` within `node_budget` LP relaxation solves.
    fn solve(&self, problem: &MilpProblem, node_budget: usize) -> MilpResult<MilpSolution>;
}
