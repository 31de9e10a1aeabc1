//! milp::branch_bound — branch and bound over microlp LP relaxations.
//!
//! Purpose
//! -------
//! Provide the crate's default [`MilpSolve`] engine. Integer variables are
//! handled by depth-first branch and bound: each node solves a continuous
//! LP relaxation with `microlp`, fractional integer columns trigger a
//! branch, and LP objectives prune subtrees that cannot beat the incumbent.
//!
//! Key behaviors
//! -------------
//! - Most-fractional branching: the integer column farthest from an integer
//!   value is split into floor/ceil children.
//! - Near-side diving: the child containing the rounded relaxation value is
//!   explored first, so the search reaches integer-feasible leaves early.
//! - Rounding heuristic: at every branching node all integer columns are
//!   fixed to their rounded relaxation values and the continuous restriction
//!   is re-solved, which produces incumbents long before the tree bottoms
//!   out.
//! - Budgeting: every LP relaxation solve (node or heuristic) counts once
//!   against the node budget.
//!
//! Invariants & assumptions
//! ------------------------
//! - Integer bounds are tightened to the enclosed integer range once at the
//!   root (`ceil`/`floor`), so all later branching arithmetic stays
//!   integral.
//! - A node's `bound` field carries its parent's LP objective, a valid lower
//!   bound for the subtree since children only add constraints.
//! - Crossed bounds are detected before an LP is attempted and surface as
//!   [`MilpError::Infeasible`].
//!
//! Conventions
//! -----------
//! - Integrality is judged against [`BranchAndBound::integrality_tol`];
//!   pruning and incumbent comparisons use the absolute gap [`GAP_TOL`].
//! - Returned integer columns are within `integrality_tol` of integers;
//!   callers owning the problem semantics perform the final rounding.
//!
//! Downstream usage
//! ----------------
//! - [`crate::ranging::resolve`] runs this engine with the configuration's
//!   iteration budget.
//! - Tests needing a deterministic solver implement [`MilpSolve`] directly
//!   instead of scripting this engine.
//!
//! Testing notes
//! -------------
//! - Unit tests below exercise pure-LP passthrough, branching on a small
//!   absolute-value MILP, infeasibility (crossed bounds and LP-level),
//!   equality rows, integer bound tightening, and both budget-exhaustion
//!   outcomes.
use microlp::{ComparisonOp, OptimizationDirection, Problem};

use crate::optimization::errors::{MilpError, MilpResult};
use crate::optimization::milp::problem::{MilpProblem, RelOp, VarDomain};
use crate::optimization::milp::solver::{MilpSolution, MilpSolve, MilpStatus};

/// Default distance from an integer below which a column counts as integral.
pub const DEFAULT_INTEGRALITY_TOL: f64 = 1e-6;

/// Absolute objective gap used for pruning and incumbent comparisons.
pub const GAP_TOL: f64 = 1e-9;

/// Depth-first branch-and-bound MILP engine backed by microlp.
///
/// Fields:
/// - `integrality_tol`: distance from an integer below which a relaxation
///   value counts as integral. Defaults to [`DEFAULT_INTEGRALITY_TOL`].
/// - `verbose`: if `true`, prints incumbent and completion progress lines.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAndBound {
    pub integrality_tol: f64,
    pub verbose: bool,
}

impl BranchAndBound {
    /// Engine with default tolerance and silent operation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self { integrality_tol: DEFAULT_INTEGRALITY_TOL, verbose: false }
    }
}

/// One open subproblem: a box restriction plus the parent relaxation bound.
struct Node {
    lower: Vec<f64>,
    upper: Vec<f64>,
    bound: f64,
}

impl MilpSolve for BranchAndBound {
    /// Solve `problem` by branch and bound within `node_budget` LP solves.
    ///
    /// # Parameters
    /// - `problem`: validated minimization MILP.
    /// - `node_budget`: maximum number of LP relaxation solves, counting the
    ///   per-node rounding heuristic.
    ///
    /// # Returns
    /// `Ok(MilpSolution)` when an integer-feasible assignment was found. The
    /// status is [`MilpStatus::Optimal`] when the tree was fully explored or
    /// pruned, [`MilpStatus::Feasible`] when the budget expired with open
    /// branches remaining.
    ///
    /// # Errors
    /// - [`MilpError::InvalidNodeBudget`] for a zero budget.
    /// - [`MilpError::Infeasible`] when no assignment satisfies the
    ///   constraint set.
    /// - [`MilpError::IterationLimit`] when the budget expired before any
    ///   integer-feasible point was found.
    /// - [`MilpError::Unbounded`] / [`MilpError::Backend`] passed through
    ///   from the LP relaxations.
    ///
    /// # Panics
    /// - Never panics.
    fn solve(&self, problem: &MilpProblem, node_budget: usize) -> MilpResult<MilpSolution> {
        if node_budget == 0 {
            return Err(MilpError::InvalidNodeBudget {
                budget: node_budget,
                reason: "At least one LP relaxation solve is required.",
            });
        }

        // Tighten integer bounds to the enclosed integer range once; all
        // later branching arithmetic stays integral.
        let mut root_lower = problem.lower().to_vec();
        let mut root_upper = problem.upper().to_vec();
        for (i, domain) in problem.domains().iter().enumerate() {
            if *domain == VarDomain::Integer {
                root_lower[i] = root_lower[i].ceil();
                root_upper[i] = root_upper[i].floor();
            }
        }
        if root_lower.iter().zip(root_upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(MilpError::Infeasible);
        }

        if self.verbose {
            let n_int =
                problem.domains().iter().filter(|d| **d == VarDomain::Integer).count();
            eprintln!(
                "branch and bound: {} variables ({} integer), {} constraints, node budget {}",
                problem.num_vars(),
                n_int,
                problem.num_constraints(),
                node_budget
            );
        }

        let mut stack =
            vec![Node { lower: root_lower, upper: root_upper, bound: f64::NEG_INFINITY }];
        let mut incumbent: Option<Vec<f64>> = None;
        let mut incumbent_objective = f64::INFINITY;
        let mut nodes_processed = 0usize;
        let mut budget_exhausted = false;

        while let Some(node) = stack.pop() {
            if node.bound >= incumbent_objective - GAP_TOL {
                continue;
            }
            if nodes_processed >= node_budget {
                // Not processed: push back so open-branch accounting sees it.
                stack.push(node);
                budget_exhausted = true;
                break;
            }
            nodes_processed += 1;

            let (values, objective) = match solve_relaxation(problem, &node.lower, &node.upper) {
                Ok(relaxed) => relaxed,
                Err(MilpError::Infeasible) => continue,
                Err(err) => return Err(err),
            };
            if objective >= incumbent_objective - GAP_TOL {
                continue;
            }

            match most_fractional(problem.domains(), &values, self.integrality_tol) {
                None => {
                    if self.verbose {
                        eprintln!(
                            "branch and bound: incumbent objective {objective:.6} after \
                             {nodes_processed} nodes"
                        );
                    }
                    incumbent = Some(values);
                    incumbent_objective = objective;
                }
                Some((branch_var, branch_value)) => {
                    if nodes_processed < node_budget {
                        nodes_processed += 1;
                        if let Ok((heur_values, heur_objective)) =
                            solve_rounded(problem, &node, &values)
                        {
                            if heur_objective < incumbent_objective - GAP_TOL {
                                if self.verbose {
                                    eprintln!(
                                        "branch and bound: incumbent objective \
                                         {heur_objective:.6} after {nodes_processed} nodes \
                                         (rounding heuristic)"
                                    );
                                }
                                incumbent = Some(heur_values);
                                incumbent_objective = heur_objective;
                            }
                        }
                    }

                    let floor = branch_value.floor();
                    let mut down =
                        Node { lower: node.lower.clone(), upper: node.upper.clone(), bound: objective };
                    down.upper[branch_var] = floor;
                    let mut up = Node { lower: node.lower, upper: node.upper, bound: objective };
                    up.lower[branch_var] = floor + 1.0;
                    // Near side last, so the dive pops it first.
                    if branch_value - floor <= 0.5 {
                        stack.push(up);
                        stack.push(down);
                    } else {
                        stack.push(down);
                        stack.push(up);
                    }
                }
            }
        }

        match incumbent {
            Some(values) => {
                let open_remains = budget_exhausted
                    && stack.iter().any(|n| n.bound < incumbent_objective - GAP_TOL);
                let status =
                    if open_remains { MilpStatus::Feasible } else { MilpStatus::Optimal };
                if self.verbose {
                    eprintln!(
                        "branch and bound: finished with status {status:?} after \
                         {nodes_processed} nodes, objective {incumbent_objective:.6}"
                    );
                }
                Ok(MilpSolution {
                    values,
                    objective: incumbent_objective,
                    status,
                    nodes_processed,
                })
            }
            None if budget_exhausted => Err(MilpError::IterationLimit { nodes_processed }),
            None => Err(MilpError::Infeasible),
        }
    }
}

/// Solve the continuous relaxation of `problem` under a box restriction.
///
/// # Returns
/// The assignment (one value per column) and its objective.
///
/// # Errors
/// - [`MilpError::Infeasible`] for crossed bounds or an infeasible LP.
/// - [`MilpError::Unbounded`] / [`MilpError::Backend`] from the LP backend.
fn solve_relaxation(
    problem: &MilpProblem, lower: &[f64], upper: &[f64],
) -> MilpResult<(Vec<f64>, f64)> {
    if lower.iter().zip(upper.iter()).any(|(lo, hi)| lo > hi) {
        return Err(MilpError::Infeasible);
    }

    let mut lp = Problem::new(OptimizationDirection::Minimize);
    let lp_vars: Vec<microlp::Variable> = problem
        .objective()
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .map(|(&obj, (&lo, &hi))| lp.add_var(obj, (lo, hi)))
        .collect();
    for row in problem.constraints() {
        let terms: Vec<(microlp::Variable, f64)> =
            row.terms.iter().map(|&(var, coeff)| (lp_vars[var.index()], coeff)).collect();
        lp.add_constraint(terms.as_slice(), relop_to_lp(row.op), row.rhs);
    }

    match lp.solve() {
        Ok(solution) => {
            let values = lp_vars.iter().map(|&v| solution[v]).collect();
            Ok((values, solution.objective()))
        }
        Err(microlp::Error::Infeasible) => Err(MilpError::Infeasible),
        Err(microlp::Error::Unbounded) => Err(MilpError::Unbounded),
        Err(other) => Err(MilpError::Backend { text: other.to_string() }),
    }
}

/// Re-solve the continuous restriction with every integer column fixed to
/// its rounded relaxation value (clamped into the node box). Heuristic
/// failures are reported as errors for the caller to ignore.
fn solve_rounded(
    problem: &MilpProblem, node: &Node, relaxation: &[f64],
) -> MilpResult<(Vec<f64>, f64)> {
    let mut lower = node.lower.clone();
    let mut upper = node.upper.clone();
    for (i, domain) in problem.domains().iter().enumerate() {
        if *domain != VarDomain::Integer {
            continue;
        }
        let fixed = relaxation[i].round().clamp(lower[i], upper[i]);
        lower[i] = fixed;
        upper[i] = fixed;
    }
    solve_relaxation(problem, &lower, &upper)
}

/// Integer column farthest from integrality, with its relaxation value.
/// Returns `None` when every integer column is integral within `tol`.
fn most_fractional(domains: &[VarDomain], values: &[f64], tol: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut best_distance = -1.0;
    for (i, domain) in domains.iter().enumerate() {
        if *domain != VarDomain::Integer {
            continue;
        }
        let value = values[i];
        let frac = value - value.floor();
        let distance = frac.min(1.0 - frac);
        if distance <= tol {
            continue;
        }
        if distance > best_distance {
            best_distance = distance;
            best = Some((i, value));
        }
    }
    best
}

fn relop_to_lp(op: RelOp) -> ComparisonOp {
    match op {
        RelOp::Le => ComparisonOp::Le,
        RelOp::Ge => ComparisonOp::Ge,
        RelOp::Eq => ComparisonOp::Eq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::milp::problem::VarId;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pure-LP passthrough when no integer variables exist.
    // - Branching to optimality on a small absolute-value MILP.
    // - Infeasibility via crossed bounds and via LP-level constraints.
    // - Integer bound tightening (fractional boxes with no integer inside).
    // - Equality constraint handling.
    // - Both budget-exhaustion outcomes: no incumbent (error) and incumbent
    //   present (feasible status).
    // - Most-fractional selection on a hand-built relaxation vector.
    //
    // They intentionally DO NOT cover:
    // - The ambiguity-resolution MILP itself (resolver and integration
    //   tests).
    // -------------------------------------------------------------------------

    /// Small MILP: minimize t subject to t >= x - 2.5 and t >= 2.5 - x with
    /// x integer in [0, 10]. Optimum is t = 0.5 at x in {2, 3}.
    fn absolute_value_milp() -> (MilpProblem, VarId) {
        let mut problem = MilpProblem::new();
        let x = problem.add_integer(0.0, 0.0, 10.0).expect("x should register");
        let t = problem.add_continuous(1.0, 0.0, f64::INFINITY).expect("t should register");
        problem
            .add_constraint(vec![(t, 1.0), (x, -1.0)], RelOp::Ge, -2.5)
            .expect("Upper residual row should be accepted");
        problem
            .add_constraint(vec![(t, 1.0), (x, 1.0)], RelOp::Ge, 2.5)
            .expect("Lower residual row should be accepted");
        (problem, x)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a problem with no integer variables is solved in a single
    // LP relaxation and certified optimal.
    //
    // Given
    // -----
    // - minimize x with x continuous in [3, 10].
    //
    // Expect
    // ------
    // - x = 3, objective 3, status Optimal, exactly one node.
    fn continuous_problem_passes_through() {
        // Arrange
        let mut problem = MilpProblem::new();
        let x = problem.add_continuous(1.0, 3.0, 10.0).expect("x should register");
        let engine = BranchAndBound::new();

        // Act
        let solution = engine.solve(&problem, 100).expect("LP should solve");

        // Assert
        assert_eq!(solution.status, MilpStatus::Optimal, "Pure LP should certify optimality");
        assert_eq!(solution.nodes_processed, 1, "Pure LP should use exactly one node");
        assert!((solution.value(x) - 3.0).abs() < 1e-9, "x should sit at its lower bound");
        assert!((solution.objective - 3.0).abs() < 1e-9, "Objective should equal 3");
    }

    #[test]
    // Purpose
    // -------
    // Verify branching on the absolute-value MILP: the relaxation optimum
    // x = 2.5 is fractional and the engine must recover an integer optimum.
    //
    // Given
    // -----
    // - The absolute-value MILP with a generous budget.
    //
    // Expect
    // ------
    // - Status Optimal, objective 0.5, x integral and in {2, 3}.
    fn branches_to_integer_optimum() {
        // Arrange
        let (problem, x) = absolute_value_milp();
        let engine = BranchAndBound::new();

        // Act
        let solution = engine.solve(&problem, 50).expect("MILP should solve");

        // Assert
        assert_eq!(solution.status, MilpStatus::Optimal, "Search should certify optimality");
        assert!((solution.objective - 0.5).abs() < 1e-9, "Optimum is 0.5, got {}", solution.objective);
        let x_value = solution.value(x);
        assert!(
            (x_value - x_value.round()).abs() < 1e-6,
            "Integer column should be integral, got {x_value}"
        );
        let rounded = x_value.round();
        assert!(rounded == 2.0 || rounded == 3.0, "x should be 2 or 3, got {rounded}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure crossed bounds are reported infeasible before any LP runs.
    //
    // Given
    // -----
    // - An integer variable with lower bound 10 and upper bound 5.
    //
    // Expect
    // ------
    // - `MilpError::Infeasible` without consuming the budget.
    fn crossed_bounds_are_infeasible() {
        // Arrange
        let mut problem = MilpProblem::new();
        problem.add_integer(1.0, 10.0, 5.0).expect("Crossed bounds register fine");
        let engine = BranchAndBound::new();

        // Act
        let result = engine.solve(&problem, 10);

        // Assert
        assert_eq!(result, Err(MilpError::Infeasible), "Crossed bounds admit no solution");
    }

    #[test]
    // Purpose
    // -------
    // Ensure constraint-level infeasibility from the LP relaxation is
    // propagated when no branch can help.
    //
    // Given
    // -----
    // - x, y >= 1 by bounds but x + y <= 1 by constraint.
    //
    // Expect
    // ------
    // - `MilpError::Infeasible`.
    fn lp_infeasibility_propagates() {
        // Arrange
        let mut problem = MilpProblem::new();
        let x = problem.add_continuous(1.0, 1.0, 10.0).expect("x should register");
        let y = problem.add_continuous(1.0, 1.0, 10.0).expect("y should register");
        problem
            .add_constraint(vec![(x, 1.0), (y, 1.0)], RelOp::Le, 1.0)
            .expect("Row should be accepted");
        let engine = BranchAndBound::new();

        // Act
        let result = engine.solve(&problem, 10);

        // Assert
        assert_eq!(result, Err(MilpError::Infeasible), "The constraint contradicts the bounds");
    }

    #[test]
    // Purpose
    // -------
    // Verify integer bound tightening: a fractional box holding no integer
    // is infeasible, and one holding a single integer pins the variable.
    //
    // Given
    // -----
    // - x integer in [2.3, 2.7] (empty) and y integer in [2.3, 3.7]
    //   (only 3).
    //
    // Expect
    // ------
    // - The first problem is infeasible; the second solves with y = 3.
    fn integer_bounds_are_tightened() {
        // Arrange
        let mut empty_box = MilpProblem::new();
        empty_box.add_integer(1.0, 2.3, 2.7).expect("x should register");
        let mut single_int = MilpProblem::new();
        let y = single_int.add_integer(1.0, 2.3, 3.7).expect("y should register");
        let engine = BranchAndBound::new();

        // Act
        let infeasible = engine.solve(&empty_box, 10);
        let pinned = engine.solve(&single_int, 10).expect("Single-integer box should solve");

        // Assert
        assert_eq!(infeasible, Err(MilpError::Infeasible), "No integer lies in [2.3, 2.7]");
        assert!((pinned.value(y) - 3.0).abs() < 1e-9, "y should be pinned to 3");
        assert_eq!(pinned.status, MilpStatus::Optimal, "Pinned box should certify");
    }

    #[test]
    // Purpose
    // -------
    // Verify equality rows reach the backend intact.
    //
    // Given
    // -----
    // - minimize 2x + y with x integer, y continuous, x + y == 7.5.
    //
    // Expect
    // ------
    // - x = 0, y = 7.5, objective 7.5, Optimal.
    fn equality_rows_are_respected() {
        // Arrange
        let mut problem = MilpProblem::new();
        let x = problem.add_integer(2.0, 0.0, 10.0).expect("x should register");
        let y = problem.add_continuous(1.0, 0.0, 10.0).expect("y should register");
        problem
            .add_constraint(vec![(x, 1.0), (y, 1.0)], RelOp::Eq, 7.5)
            .expect("Equality row should be accepted");
        let engine = BranchAndBound::new();

        // Act
        let solution = engine.solve(&problem, 50).expect("MILP should solve");

        // Assert
        assert!((solution.value(x) - 0.0).abs() < 1e-6, "x should be 0");
        assert!((solution.value(y) - 7.5).abs() < 1e-6, "y should carry the remainder");
        assert!((solution.objective - 7.5).abs() < 1e-9, "Objective should be 7.5");
    }

    #[test]
    // Purpose
    // -------
    // Verify a zero node budget is rejected up front.
    //
    // Given
    // -----
    // - Any problem and node_budget = 0.
    //
    // Expect
    // ------
    // - `MilpError::InvalidNodeBudget`.
    fn zero_budget_is_rejected() {
        // Arrange
        let (problem, _) = absolute_value_milp();
        let engine = BranchAndBound::new();

        // Act
        let result = engine.solve(&problem, 0);

        // Assert
        assert!(
            matches!(result, Err(MilpError::InvalidNodeBudget { budget: 0, .. })),
            "Zero budget should be rejected, got {result:?}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the no-incumbent budget exhaustion path: one node is enough to
    // solve the root relaxation but not to run the heuristic or branch.
    //
    // Given
    // -----
    // - The absolute-value MILP with node_budget = 1.
    //
    // Expect
    // ------
    // - `MilpError::IterationLimit` reporting one processed node.
    fn budget_exhaustion_without_incumbent_errors() {
        // Arrange
        let (problem, _) = absolute_value_milp();
        let engine = BranchAndBound::new();

        // Act
        let result = engine.solve(&problem, 1);

        // Assert
        assert_eq!(
            result,
            Err(MilpError::IterationLimit { nodes_processed: 1 }),
            "One node leaves no room for an incumbent"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the incumbent-but-unproven path: two nodes let the rounding
    // heuristic produce an incumbent while branches stay open.
    //
    // Given
    // -----
    // - The absolute-value MILP with node_budget = 2.
    //
    // Expect
    // ------
    // - `Ok` with status Feasible, objective 0.5, both nodes consumed.
    fn budget_exhaustion_with_incumbent_reports_feasible() {
        // Arrange
        let (problem, x) = absolute_value_milp();
        let engine = BranchAndBound::new();

        // Act
        let solution = engine.solve(&problem, 2).expect("Heuristic should find an incumbent");

        // Assert
        assert_eq!(solution.status, MilpStatus::Feasible, "Open branches remain at budget");
        assert_eq!(solution.nodes_processed, 2, "Both budgeted nodes should be consumed");
        assert!((solution.objective - 0.5).abs() < 1e-9, "Heuristic incumbent is optimal here");
        assert!((solution.value(x) - 3.0).abs() < 1e-6, "Rounding 2.5 fixes x to 3");
    }

    #[test]
    // Purpose
    // -------
    // Verify most-fractional selection: the column nearest half-integrality
    // wins and integral columns are skipped.
    //
    // Given
    // -----
    // - Three integer columns at 1.0 (integral), 2.2, and 3.45.
    //
    // Expect
    // ------
    // - Column 2 (value 3.45) is selected.
    fn most_fractional_prefers_half_integral() {
        // Arrange
        let domains = [VarDomain::Integer, VarDomain::Integer, VarDomain::Integer];
        let values = [1.0, 2.2, 3.45];

        // Act
        let pick = most_fractional(&domains, &values, DEFAULT_INTEGRALITY_TOL);

        // Assert
        match pick {
            Some((index, value)) => {
                assert_eq!(index, 2, "3.45 is farther from an integer than 2.2");
                assert!((value - 3.45).abs() < 1e-12, "The relaxation value should be echoed");
            }
            None => panic!("A fractional column should be found"),
        }
    }
}
