//! ranging::types — shared numeric aliases and resolver constants.
//!
//! Purpose
//! -------
//! Centralize the core numeric types used by the ambiguity resolver. By
//! defining these in one place, the rest of the ranging code can stay
//! agnostic to `ndarray` and `num-complex` generics and can more easily
//! evolve if the backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for the measurement channel: complex
//!   observations, wavelengths, phase variances, cycle counts, and
//!   residuals.
//! - Fix the default node budget applied when callers do not override it.
//!
//! Invariants & assumptions
//! ------------------------
//! - All resolver vectors are `ndarray` containers indexed by wavelength
//!   channel; every alias below has the same length for one problem.
//! - Observations are unit-magnitude up to noise and mixing; only their
//!   arguments (phases) enter the fit.
//!
//! Conventions
//! -----------
//! - `CycleCounts` are signed: a negative count corresponds to a phase
//!   unwrapped below zero and is a valid resolver output.
//! - Residuals are reported in radians, unweighted, one per channel.
//! - This module defines no runtime behavior beyond what `ndarray`
//!   requires when these types are instantiated elsewhere.
//!
//! Downstream usage
//! ----------------
//! - Other ranging modules import these aliases instead of referring
//!   directly to `ndarray` or `num-complex` generics.
//! - [`crate::ranging::resolve`] accepts [`Observations`],
//!   [`Wavelengths`], and [`PhaseVariances`] and returns a
//!   [`crate::ranging::Resolution`] carrying [`CycleCounts`] and
//!   [`Residuals`].
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases and a constant; there are no
//!   dedicated unit tests.
use ndarray::Array1;
use num_complex::Complex64;

/// Complex backscatter observations, one per wavelength channel.
///
/// Alias for `ndarray::Array1<Complex64>`; only the argument of each entry
/// participates in the fit, magnitudes are ignored.
pub type Observations = Array1<Complex64>;

/// Carrier wavelengths, one per channel, in the same length unit as the
/// recovered distance.
pub type Wavelengths = Array1<f64>;

/// Phase noise variances, one per channel, in squared radians.
///
/// The resolver weights residuals by inverse standard deviation, so it
/// requires strictly positive variances; the signal synthesizer accepts
/// zero (a noiseless channel).
pub type PhaseVariances = Array1<f64>;

/// Integer cycle counts recovered by the resolver, one per channel.
pub type CycleCounts = Array1<i64>;

/// Unweighted phase residuals in radians, one per channel.
pub type Residuals = Array1<f64>;

/// Default node budget for the branch-and-bound engine.
pub const DEFAULT_MAX_ITER: usize = 300;
