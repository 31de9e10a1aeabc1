//! High-level entry points for ambiguity resolution.
//!
//! [`resolve`] runs the bundled branch-and-bound engine; [`resolve_with`]
//! accepts any [`MilpSolve`] implementation so the assembly and extraction
//! logic stays testable against deterministic fakes. Both validate every
//! input before the engine is invoked and surface uncertified incumbents
//! as [`RangingError::Suboptimal`] rather than silently treating them as
//! success.
use crate::optimization::milp::{BranchAndBound, MilpSolve, MilpStatus};
use crate::ranging::config::ResolverOptions;
use crate::ranging::errors::{RangingError, RangingResult};
use crate::ranging::outcome::Resolution;
use crate::ranging::resolver::assemble::assemble_problem;
use crate::ranging::resolver::extract::extract_resolution;
use crate::ranging::types::{CycleCounts, Observations, PhaseVariances, Wavelengths};
use crate::ranging::validation::{
    validate_cycles, validate_max_iter, validate_n_obs, validate_observations,
    validate_phase_variances, validate_wavelengths,
};
use std::f64::consts::PI;

/// Resolve distance and cycle counts with the bundled branch-and-bound
/// engine.
///
/// # Behavior
/// - Validates observations, wavelengths, variances, and the configured
///   `n_obs`/`max_iter` before anything is assembled.
/// - Builds the weighted L1 MILP, solves it within `options.max_iter`
///   nodes, and extracts `(d*, N*, residuals)`.
/// - Maps engine statuses onto the error taxonomy: a certified optimum
///   returns `Ok`, an uncertified incumbent returns
///   [`RangingError::Suboptimal`] carrying the incumbent, and exhaustion
///   without an incumbent returns [`RangingError::SolverTimeout`].
///
/// # Parameters
/// - `observations`: complex measurements, one per wavelength channel.
/// - `wavelengths`: strictly positive carrier wavelengths, paired
///   index-for-index with `observations`.
/// - `phase_variances`: strictly positive noise variances used for
///   inverse-standard-deviation weighting.
/// - `options`: constraint set and node budget from
///   [`ResolverOptions::build`].
///
/// # Errors
/// - [`RangingError::DimensionMismatch`] / [`RangingError::EmptyInput`]
///   for shape problems, before the engine runs.
/// - [`RangingError::InvalidObservation`] /
///   [`RangingError::InvalidWavelength`] /
///   [`RangingError::InvalidPhaseVariance`] /
///   [`RangingError::InvalidMaxIter`] for value problems, before the
///   engine runs.
/// - [`RangingError::Infeasible`] when the constraint set admits no
///   solution.
/// - [`RangingError::SolverTimeout`] / [`RangingError::Suboptimal`] for
///   budget exhaustion without/with an incumbent.
///
/// # Returns
/// A certified [`Resolution`]; `resolution.residuals` are unweighted
/// phase discrepancies in radians.
///
/// # Example
/// ```no_run
/// use multiwave_ranging::ranging::{resolve, Constraint, ResolverOptions};
/// use ndarray::array;
/// use num_complex::Complex64;
///
/// let observations = array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)];
/// let wavelengths = array![0.02, 0.03];
/// let variances = array![1e-4, 1e-4];
/// let options = ResolverOptions::build(2, 20_000, vec![Constraint::distance_le(20.0)])?;
///
/// let resolution = resolve(&observations, &wavelengths, &variances, &options)?;
/// println!("d* = {:.4}, N* = {}", resolution.distance, resolution.cycles);
/// # Ok::<(), multiwave_ranging::ranging::RangingError>(())
/// ```
pub fn resolve(
    observations: &Observations, wavelengths: &Wavelengths, phase_variances: &PhaseVariances,
    options: &ResolverOptions,
) -> RangingResult<Resolution> {
    let engine = BranchAndBound { verbose: options.verbose, ..BranchAndBound::default() };
    resolve_with(&engine, observations, wavelengths, phase_variances, options)
}

/// [`resolve`] against a caller-chosen MILP engine.
///
/// # Errors
/// Same as [`resolve`]; engine failures the resolver does not interpret
/// surface as [`RangingError::Solver`].
pub fn resolve_with<S: MilpSolve>(
    solver: &S, observations: &Observations, wavelengths: &Wavelengths,
    phase_variances: &PhaseVariances, options: &ResolverOptions,
) -> RangingResult<Resolution> {
    validate_observations(observations)?;
    validate_n_obs(options.n_obs, observations)?;
    validate_wavelengths(wavelengths, observations.len())?;
    validate_phase_variances(phase_variances, observations.len())?;
    validate_max_iter(options.max_iter)?;

    if options.verbose {
        eprintln!(
            "resolver: {} observations, {} constraints, node budget {}",
            observations.len(),
            options.constraints.len(),
            options.max_iter
        );
    }

    let assembled = assemble_problem(observations, wavelengths, phase_variances, options)?;
    let solution = solver.solve(&assembled.problem, options.max_iter)?;
    let certified = solution.status == MilpStatus::Optimal;
    let resolution = extract_resolution(&assembled, &solution, wavelengths, certified)?;

    if options.verbose {
        eprintln!(
            "resolver: distance {:.6}, objective {:.6}, {} after {} nodes",
            resolution.distance,
            resolution.objective,
            if certified { "certified" } else { "uncertified" },
            resolution.nodes_processed
        );
    }

    if certified {
        Ok(resolution)
    } else {
        Err(RangingError::Suboptimal { resolution: Box::new(resolution) })
    }
}

/// Weighted L1 objective of a `(distance, cycles)` hypothesis under the
/// same model the resolver minimizes.
///
/// Useful for comparing a returned resolution against hand-picked
/// hypotheses. `distance` is assumed finite; a non-finite value
/// propagates into the returned objective.
///
/// # Errors
/// - [`RangingError::DimensionMismatch`] / [`RangingError::EmptyInput`]
///   for shape problems.
/// - [`RangingError::InvalidWavelength`] /
///   [`RangingError::InvalidPhaseVariance`] for value problems.
pub fn weighted_l1_objective(
    distance: f64, cycles: &CycleCounts, observations: &Observations,
    wavelengths: &Wavelengths, phase_variances: &PhaseVariances,
) -> RangingResult<f64> {
    validate_observations(observations)?;
    validate_cycles(cycles, observations.len())?;
    validate_wavelengths(wavelengths, observations.len())?;
    validate_phase_variances(phase_variances, observations.len())?;

    let mut objective = 0.0;
    for i in 0..observations.len() {
        let weight = 1.0 / phase_variances[i].sqrt();
        let residual = 4.0 * PI * distance / wavelengths[i]
            - 2.0 * PI * (cycles[i] as f64)
            - observations[i].arg();
        objective += weight * residual.abs();
    }
    Ok(objective)
}
