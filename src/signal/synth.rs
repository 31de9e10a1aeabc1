//! signal::synth — forward simulation of multi-surface backscatter superposition.
//!
//! Purpose
//! -------
//! Synthesize the complex observations a multi-wavelength ranging instrument
//! would record when one or more surfaces backscatter its probing signal.
//! These generators feed tests, demos, and the CLI; the ambiguity resolver
//! itself never calls them.
//!
//! Key behaviors
//! -------------
//! - [`simulate`] computes the noiseless per-surface backscatter matrix and
//!   its per-wavelength superposition.
//! - [`simulate_noisy`] applies one multiplicative phase-noise rotation per
//!   wavelength to the superposed observations, drawn from a caller-supplied
//!   random source.
//! - Both validate their inputs up front and report typed [`SignalError`]
//!   values instead of producing silently wrong spectra.
//!
//! Invariants & assumptions
//! ------------------------
//! - Phase accumulates over the **round trip**: a surface at distance `d`
//!   probed at wavelength `λ` contributes phase `4π·d/λ`. Callers that need
//!   one-way phase must halve the distance.
//! - `weights` and `distances` are paired per surface and share a length;
//!   `wavelengths` (and `phase_variances` for the noisy variant) are paired
//!   per observation and share a length.
//! - Phase noise is applied once per wavelength to the aggregated
//!   observation, not per surface; the backscatter matrix stays noiseless.
//!
//! Conventions
//! -----------
//! - The backscatter matrix is `(n_surfaces, n_wavelengths)`; observations
//!   are its column sums.
//! - Noise draws are `ε_l ~ N(0, sqrt(phase_variances[l]))` applied as
//!   `exp(i·ε_l)`; a zero variance leaves the observation untouched.
//!
//! Downstream usage
//! ----------------
//! - Integration tests synthesize observations here and feed them to
//!   [`crate::ranging::resolve`].
//! - The CLI `simulate` subcommand and the Python bindings expose these
//!   functions directly.
//!
//! Testing notes
//! -------------
//! - Unit tests below verify phase placement on hand-computable cases,
//!   superposition linearity, validation failures, and seeded
//!   reproducibility of the noisy variant.
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::signal::errors::{SignalError, SignalResult};

/// Complex backscatter produced by one forward simulation.
///
/// Fields:
/// - `observations`: per-wavelength superposed measurements, length
///   `n_wavelengths`. Entry `l` is the column sum of `backscatter`.
/// - `backscatter`: per-surface contributions, shape
///   `(n_surfaces, n_wavelengths)`. Entry `(k, l)` is
///   `weights[k] · exp(i·4π·distances[k]/wavelengths[l])`.
///
/// Both fields are immutable snapshots; regenerate rather than mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub observations: Array1<Complex64>,
    pub backscatter: Array2<Complex64>,
}

/// Simulate noiseless multi-surface backscatter.
///
/// For each surface `k` and wavelength `l`:
/// `backscatter[(k, l)] = weights[k] · exp(i·4π·distances[k]/wavelengths[l])`,
/// and `observations[l]` sums the column over surfaces. The `4π` factor is
/// the round-trip phase convention; see the module docs.
///
/// # Parameters
/// - `weights`: per-surface backscatter amplitudes, finite and `> 0`.
/// - `distances`: per-surface distances, finite and `>= 0`; paired with
///   `weights`.
/// - `wavelengths`: probing wavelengths, finite and `> 0`.
///
/// # Returns
/// A [`Superposition`] holding the observations and the full backscatter
/// matrix.
///
/// # Errors
/// - [`SignalError::DimensionMismatch`] if `weights` and `distances` differ
///   in length.
/// - [`SignalError::EmptyInput`] if either the surface or the wavelength
///   sequence is empty.
/// - [`SignalError::InvalidWeight`] / [`SignalError::InvalidDistance`] /
///   [`SignalError::InvalidWavelength`] on non-finite or out-of-range
///   entries.
pub fn simulate(
    weights: &Array1<f64>, distances: &Array1<f64>, wavelengths: &Array1<f64>,
) -> SignalResult<Superposition> {
    validate_surfaces(weights, distances)?;
    validate_wavelengths(wavelengths)?;

    let n_surfaces = weights.len();
    let n_wavelengths = wavelengths.len();
    let backscatter = Array2::from_shape_fn((n_surfaces, n_wavelengths), |(k, l)| {
        Complex64::from_polar(weights[k], 4.0 * PI * distances[k] / wavelengths[l])
    });
    let observations =
        Array1::from_shape_fn(n_wavelengths, |l| backscatter.column(l).iter().sum());
    Ok(Superposition { observations, backscatter })
}

/// Simulate multi-surface backscatter with per-wavelength phase noise.
///
/// Runs the same superposition as [`simulate`], then rotates each aggregated
/// observation by `exp(i·ε_l)` with `ε_l ~ N(0, sqrt(phase_variances[l]))`
/// drawn from `rng`. The backscatter matrix is returned noiseless.
///
/// # Parameters
/// - `weights`, `distances`, `wavelengths`: as for [`simulate`].
/// - `phase_variances`: per-wavelength noise power, finite and `>= 0`;
///   paired with `wavelengths`. A zero entry disables noise at that
///   wavelength.
/// - `rng`: random source. Pass a seeded `StdRng` for reproducible draws.
///
/// # Errors
/// Everything [`simulate`] reports, plus:
/// - [`SignalError::DimensionMismatch`] if `phase_variances` and
///   `wavelengths` differ in length.
/// - [`SignalError::InvalidPhaseVariance`] on negative or non-finite
///   variances, or when the noise distribution rejects the derived standard
///   deviation.
pub fn simulate_noisy<R: Rng + ?Sized>(
    weights: &Array1<f64>, distances: &Array1<f64>, wavelengths: &Array1<f64>,
    phase_variances: &Array1<f64>, rng: &mut R,
) -> SignalResult<Superposition> {
    validate_phase_variances(phase_variances, wavelengths.len())?;

    let mut superposition = simulate(weights, distances, wavelengths)?;
    for (l, variance) in phase_variances.iter().enumerate() {
        let normal = Normal::new(0.0, variance.sqrt()).map_err(|_| {
            SignalError::InvalidPhaseVariance {
                index: l,
                value: *variance,
                reason: "Standard deviation rejected by the noise distribution.",
            }
        })?;
        let eps: f64 = normal.sample(rng);
        superposition.observations[l] *= Complex64::from_polar(1.0, eps);
    }
    Ok(superposition)
}

/// Validate the paired per-surface inputs.
///
/// # Errors
/// - [`SignalError::DimensionMismatch`] on unequal lengths.
/// - [`SignalError::EmptyInput`] when no surface is given.
/// - [`SignalError::InvalidWeight`] for weights that are non-finite or `<= 0`.
/// - [`SignalError::InvalidDistance`] for distances that are non-finite or `< 0`.
fn validate_surfaces(weights: &Array1<f64>, distances: &Array1<f64>) -> SignalResult<()> {
    if weights.len() != distances.len() {
        return Err(SignalError::DimensionMismatch {
            quantity: "distances",
            expected: weights.len(),
            actual: distances.len(),
        });
    }
    if weights.is_empty() {
        return Err(SignalError::EmptyInput { quantity: "weights" });
    }
    for (index, &value) in weights.iter().enumerate() {
        if !value.is_finite() {
            return Err(SignalError::InvalidWeight {
                index,
                value,
                reason: "Weights must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(SignalError::InvalidWeight {
                index,
                value,
                reason: "Weights must be strictly positive.",
            });
        }
    }
    for (index, &value) in distances.iter().enumerate() {
        if !value.is_finite() {
            return Err(SignalError::InvalidDistance {
                index,
                value,
                reason: "Distances must be finite.",
            });
        }
        if value < 0.0 {
            return Err(SignalError::InvalidDistance {
                index,
                value,
                reason: "Distances must be non-negative.",
            });
        }
    }
    Ok(())
}

/// Validate the probing wavelengths.
///
/// # Errors
/// - [`SignalError::EmptyInput`] when no wavelength is given.
/// - [`SignalError::InvalidWavelength`] for entries that are non-finite or
///   `<= 0` (each wavelength divides a phase term).
fn validate_wavelengths(wavelengths: &Array1<f64>) -> SignalResult<()> {
    if wavelengths.is_empty() {
        return Err(SignalError::EmptyInput { quantity: "wavelengths" });
    }
    for (index, &value) in wavelengths.iter().enumerate() {
        if !value.is_finite() {
            return Err(SignalError::InvalidWavelength {
                index,
                value,
                reason: "Wavelengths must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(SignalError::InvalidWavelength {
                index,
                value,
                reason: "Wavelengths must be strictly positive.",
            });
        }
    }
    Ok(())
}

/// Validate the per-wavelength phase variances.
///
/// # Errors
/// - [`SignalError::DimensionMismatch`] if the length differs from
///   `n_wavelengths`.
/// - [`SignalError::InvalidPhaseVariance`] for negative or non-finite
///   entries.
fn validate_phase_variances(phase_variances: &Array1<f64>, n_wavelengths: usize) -> SignalResult<()> {
    if phase_variances.len() != n_wavelengths {
        return Err(SignalError::DimensionMismatch {
            quantity: "phase variances",
            expected: n_wavelengths,
            actual: phase_variances.len(),
        });
    }
    for (index, &value) in phase_variances.iter().enumerate() {
        if !value.is_finite() {
            return Err(SignalError::InvalidPhaseVariance {
                index,
                value,
                reason: "Phase variances must be finite.",
            });
        }
        if value < 0.0 {
            return Err(SignalError::InvalidPhaseVariance {
                index,
                value,
                reason: "Phase variances must be non-negative.",
            });
        }
    }
    Ok(())
}
