//! Validation helpers for ambiguity resolution.
//!
//! This module centralizes the consistency checks the resolver and the
//! objective helper run before any MILP is assembled or any hypothesis is
//! scored:
//!
//! - **Shape checks**: [`validate_n_obs`] ties the configured observation
//!   count to the actual input; wavelength, variance, and cycle validators
//!   enforce index-for-index pairing.
//! - **Observation validation**: [`validate_observations`] enforces
//!   non-empty input with finite components.
//! - **Channel parameters**: [`validate_wavelengths`] and
//!   [`validate_phase_variances`] enforce finiteness and strict positivity
//!   (the inverse-standard-deviation weight is undefined at zero
//!   variance).
//! - **Budget**: [`validate_max_iter`] enforces a positive node budget.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`RangingError`] variants, so every invalid input fails before the
//! engine is invoked.
use crate::ranging::errors::{RangingError, RangingResult};
use crate::ranging::types::{CycleCounts, Observations, PhaseVariances, Wavelengths};

/// Validate that the configured observation count matches the data.
///
/// # Errors
/// Returns [`RangingError::DimensionMismatch`] if `configured` differs
/// from `observations.len()`.
pub fn validate_n_obs(configured: usize, observations: &Observations) -> RangingResult<()> {
    if configured != observations.len() {
        return Err(RangingError::DimensionMismatch {
            quantity: "observations (configured n_obs)",
            expected: configured,
            actual: observations.len(),
        });
    }
    Ok(())
}

/// Validate the observation vector itself.
///
/// # Errors
/// - [`RangingError::EmptyInput`] if no observations were supplied.
/// - [`RangingError::InvalidObservation`] if any component is non-finite.
pub fn validate_observations(observations: &Observations) -> RangingResult<()> {
    if observations.is_empty() {
        return Err(RangingError::EmptyInput { quantity: "observations" });
    }
    for (index, value) in observations.iter().enumerate() {
        if !value.re.is_finite() || !value.im.is_finite() {
            return Err(RangingError::InvalidObservation {
                index,
                re: value.re,
                im: value.im,
                reason: "Observation components must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate wavelengths against length and positivity.
///
/// # Errors
/// - [`RangingError::DimensionMismatch`] if the length differs from
///   `n_obs`.
/// - [`RangingError::InvalidWavelength`] with the index/value/reason of
///   the first non-finite or non-positive entry.
pub fn validate_wavelengths(wavelengths: &Wavelengths, n_obs: usize) -> RangingResult<()> {
    if wavelengths.len() != n_obs {
        return Err(RangingError::DimensionMismatch {
            quantity: "wavelengths",
            expected: n_obs,
            actual: wavelengths.len(),
        });
    }
    for (index, &value) in wavelengths.iter().enumerate() {
        if !value.is_finite() {
            return Err(RangingError::InvalidWavelength {
                index,
                value,
                reason: "Wavelengths must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(RangingError::InvalidWavelength {
                index,
                value,
                reason: "Wavelengths must be strictly positive.",
            });
        }
    }
    Ok(())
}

/// Validate phase variances against length and strict positivity.
///
/// Zero is rejected here even though the signal synthesizer accepts it:
/// the residual weight `1/sqrt(variance)` is undefined at zero.
///
/// # Errors
/// - [`RangingError::DimensionMismatch`] if the length differs from
///   `n_obs`.
/// - [`RangingError::InvalidPhaseVariance`] with the index/value/reason of
///   the first non-finite or non-positive entry.
pub fn validate_phase_variances(
    phase_variances: &PhaseVariances, n_obs: usize,
) -> RangingResult<()> {
    if phase_variances.len() != n_obs {
        return Err(RangingError::DimensionMismatch {
            quantity: "phase_variances",
            expected: n_obs,
            actual: phase_variances.len(),
        });
    }
    for (index, &value) in phase_variances.iter().enumerate() {
        if !value.is_finite() {
            return Err(RangingError::InvalidPhaseVariance {
                index,
                value,
                reason: "Phase variances must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(RangingError::InvalidPhaseVariance {
                index,
                value,
                reason: "Phase variances must be strictly positive for weighting.",
            });
        }
    }
    Ok(())
}

/// Validate a cycle-count hypothesis against the observation count.
///
/// # Errors
/// Returns [`RangingError::DimensionMismatch`] if `cycles.len()` differs
/// from `n_obs`.
pub fn validate_cycles(cycles: &CycleCounts, n_obs: usize) -> RangingResult<()> {
    if cycles.len() != n_obs {
        return Err(RangingError::DimensionMismatch {
            quantity: "cycles",
            expected: n_obs,
            actual: cycles.len(),
        });
    }
    Ok(())
}

/// Validate the node budget.
///
/// # Errors
/// Returns [`RangingError::InvalidMaxIter`] if `max_iter` is zero.
pub fn validate_max_iter(max_iter: usize) -> RangingResult<()> {
    if max_iter == 0 {
        return Err(RangingError::InvalidMaxIter {
            max_iter,
            reason: "At least one solver node is required.",
        });
    }
    Ok(())
}
