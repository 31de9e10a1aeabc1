//! resolver::extract — read a MILP solution back into a [`Resolution`].
//!
//! The engine returns raw column values; this module turns them into the
//! caller-facing outcome:
//!
//! - the distance column is taken as-is,
//! - cycle columns are rounded to integers, rejecting anything farther
//!   than [`CYCLE_INT_TOL`] from an integer or too large for exact float
//!   representation,
//! - residuals are recomputed **unweighted** from the rounded cycles,
//!   `r[i] = (4π / λ[i]) d − 2π N[i] − φ[i]`, so diagnostics show raw
//!   phase discrepancies even though the objective weighted them.
use std::f64::consts::PI;

use ndarray::Array1;

use crate::optimization::milp::MilpSolution;
use crate::ranging::errors::{RangingError, RangingResult};
use crate::ranging::outcome::Resolution;
use crate::ranging::resolver::assemble::AssembledMilp;
use crate::ranging::types::Wavelengths;

/// Distance from an integer beyond which a cycle column is rejected.
///
/// Looser than the engine's own integrality tolerance so LP round-off
/// cannot fail extraction, but tight enough that a genuinely fractional
/// column is an error rather than silently rounded.
pub const CYCLE_INT_TOL: f64 = 1e-4;

// Past 2^53 a double cannot hold the integer exactly, so the count is
// meaningless regardless of i64 range.
const MAX_CYCLE_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Turn an engine solution into a validated [`Resolution`].
///
/// # Errors
/// - [`RangingError::NonIntegralCycle`] if a cycle column is farther than
///   [`CYCLE_INT_TOL`] from an integer.
/// - [`RangingError::CycleOutOfRange`] if a rounded count exceeds exact
///   float range.
/// - Propagates [`Resolution::new`] validation failures.
pub fn extract_resolution(
    assembled: &AssembledMilp, solution: &MilpSolution, wavelengths: &Wavelengths,
    certified: bool,
) -> RangingResult<Resolution> {
    let distance = solution.value(assembled.distance);

    let mut cycles = Vec::with_capacity(assembled.cycles.len());
    for (index, var) in assembled.cycles.iter().enumerate() {
        let value = solution.value(*var);
        let rounded = value.round();
        if (value - rounded).abs() > CYCLE_INT_TOL {
            return Err(RangingError::NonIntegralCycle { index, value });
        }
        if rounded.abs() > MAX_CYCLE_MAGNITUDE {
            return Err(RangingError::CycleOutOfRange { index, value });
        }
        cycles.push(rounded as i64);
    }
    let cycles = Array1::from(cycles);

    let residuals = Array1::from_shape_fn(cycles.len(), |i| {
        4.0 * PI * distance / wavelengths[i] - 2.0 * PI * (cycles[i] as f64)
            - assembled.phases[i]
    });

    Resolution::new(
        distance,
        cycles,
        residuals,
        solution.objective,
        certified,
        solution.nodes_processed,
    )
}
