//! ranging — multi-wavelength ambiguity resolution under an L1 criterion.
//!
//! Purpose
//! -------
//! Recover a single physical distance from phase-wrapped measurements
//! taken at multiple wavelengths. Each wavelength only determines the
//! distance modulo itself, so the resolver jointly estimates a real
//! distance `d` and an integer cycle count `N[i]` per observation that
//! together best explain the observed phases, by minimizing a weighted L1
//! residual as a mixed-integer linear program.
//!
//! Key behaviors
//! -------------
//! - Expose a single, user-facing entrypoint [`resolve`] that:
//!   - validates observations, wavelengths, variances, and configuration,
//!   - assembles the L1 fit via [`resolver::assemble`],
//!   - solves it with the bundled branch-and-bound engine, and
//!   - extracts a validated [`Resolution`] via [`resolver::extract`].
//! - Accept any engine through [`resolve_with`] and the
//!   [`crate::optimization::milp::MilpSolve`] seam, so assembly and
//!   extraction are testable against deterministic fakes.
//! - Express caller constraints in a closed, serializable grammar
//!   ([`constraints`]) interpreted at assembly time; nothing is ever
//!   evaluated dynamically.
//! - Surface solution quality honestly: an uncertified incumbent is an
//!   [`errors::RangingError::Suboptimal`] error carrying the incumbent,
//!   never a silent success.
//!
//! Invariants & assumptions
//! ------------------------
//! - `len(observations) == len(wavelengths) == len(phase_variances) ==
//!   len(N)` for one call; every violation fails before the engine runs.
//! - Wavelengths and phase variances are strictly positive; the weight
//!   `1/sqrt(variance)` is undefined at zero.
//! - Cycle counts and the distance are non-negative under the default
//!   configuration; callers can lift either default by assembling
//!   [`ResolverOptions`] manually.
//! - Each call is stateless and owns its decision variables; independent
//!   calls may run on separate threads with no shared state.
//!
//! Conventions
//! -----------
//! - Phases follow the two-way (round-trip) convention: a surface at
//!   distance `d` contributes `4π d / λ` radians of accumulated phase.
//! - The objective weights residuals by inverse standard deviation;
//!   reported residuals are deliberately unweighted.
//! - Errors bubble up as [`errors::RangingResult`]; this module and its
//!   children never intentionally panic on caller input.
//!
//! Downstream usage
//! ----------------
//! - Library callers build a [`ResolverOptions`] (constraint set plus
//!   node budget) and call [`resolve`] with their channel data.
//! - The CLI and the Python bindings interact only with the re-exported
//!   surface: [`resolve`], [`resolve_with`], [`Resolution`],
//!   [`ResolverOptions`], [`Constraint`], and the error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover input validation, constraint folding,
//!   configuration defaults, assembly layout, extraction rounding, and
//!   status mapping through a scripted engine.
//! - Integration tests exercise [`resolve`] end to end on synthesized
//!   signals: noiseless round trips, noise robustness, weight invariance,
//!   infeasibility, and the mixed-pixel sanity bound.

pub mod config;
pub mod constraints;
pub mod errors;
pub mod outcome;
pub mod resolver;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::ResolverOptions;
pub use self::constraints::{fold_bounds, Comparator, Constraint, VarBounds, VarRef};
pub use self::errors::{RangingError, RangingResult};
pub use self::outcome::Resolution;
pub use self::resolver::{resolve, resolve_with, weighted_l1_objective};
pub use self::types::{
    CycleCounts, Observations, PhaseVariances, Residuals, Wavelengths, DEFAULT_MAX_ITER,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use multiwave_ranging::ranging::prelude::*;
//
// to import the main resolver surface in a single line.

pub mod prelude {
    pub use super::config::ResolverOptions;
    pub use super::constraints::{Comparator, Constraint, VarRef};
    pub use super::errors::{RangingError, RangingResult};
    pub use super::outcome::Resolution;
    pub use super::resolver::{resolve, resolve_with, weighted_l1_objective};
    pub use super::types::{CycleCounts, Observations, PhaseVariances, Residuals, Wavelengths};
}
