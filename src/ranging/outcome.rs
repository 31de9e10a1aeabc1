//! Resolution outcome returned to callers.
use num_complex::Complex64;

use crate::ranging::errors::{RangingError, RangingResult};
use crate::ranging::types::{CycleCounts, Observations, Residuals};

/// Canonical result returned by [`crate::ranging::resolve`].
///
/// - `distance`: best-fit distance `d*`, in the wavelength unit.
/// - `cycles`: best-fit integer cycle counts `N*`, one per observation.
/// - `residuals`: unweighted phase residuals in radians,
///   `r[i] = 2π (2 d* / λ[i] − N*[i]) − φ[i]`. The objective weights
///   residuals by inverse standard deviation, these deliberately do not.
/// - `objective`: weighted L1 objective value at the returned assignment.
/// - `certified`: `true` when the engine proved optimality; `false` on an
///   incumbent accepted from an exhausted budget.
/// - `nodes_processed`: LP relaxations the engine spent on this call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub distance: f64,
    pub cycles: CycleCounts,
    pub residuals: Residuals,
    pub objective: f64,
    pub certified: bool,
    pub nodes_processed: usize,
}

impl Resolution {
    /// Build a validated [`Resolution`] from extracted solver output.
    ///
    /// Performs:
    /// - finiteness checks on `distance` and `objective`,
    /// - a length check between `cycles` and `residuals`.
    ///
    /// # Errors
    /// - [`RangingError::Solver`] if the engine produced a non-finite
    ///   distance or objective.
    /// - [`RangingError::DimensionMismatch`] if the vectors disagree in
    ///   length.
    pub fn new(
        distance: f64, cycles: CycleCounts, residuals: Residuals, objective: f64,
        certified: bool, nodes_processed: usize,
    ) -> RangingResult<Self> {
        if !distance.is_finite() {
            return Err(RangingError::Solver {
                text: format!("Engine returned a non-finite distance: {distance}"),
            });
        }
        if !objective.is_finite() {
            return Err(RangingError::Solver {
                text: format!("Engine returned a non-finite objective: {objective}"),
            });
        }
        if cycles.len() != residuals.len() {
            return Err(RangingError::DimensionMismatch {
                quantity: "residuals",
                expected: cycles.len(),
                actual: residuals.len(),
            });
        }
        Ok(Self { distance, cycles, residuals, objective, certified, nodes_processed })
    }

    /// Residuals as unit-magnitude complex rotations, `exp(i r[k])`.
    ///
    /// Multiplying a noiseless prediction by the conjugate of these rotates
    /// it onto the observation, which makes them convenient for plotting
    /// against raw data.
    pub fn complex_residuals(&self) -> Observations {
        self.residuals.mapv(|r| Complex64::from_polar(1.0, r))
    }
}
