//! Resolver configuration: constraint set and node budget.
//!
//! [`ResolverOptions`] is the configuration object one resolution call
//! consumes. It is built once per call and read-only during solving; the
//! constraint list uses the closed grammar from
//! [`crate::ranging::constraints`] so configurations stay serializable and
//! solver-independent.
use crate::ranging::constraints::Constraint;
use crate::ranging::errors::{RangingError, RangingResult};
use crate::ranging::types::DEFAULT_MAX_ITER;
use crate::ranging::validation::validate_max_iter;

/// Configuration for one ambiguity-resolution call.
///
/// Fields:
/// - `n_obs`: number of observations the constraint set was built for;
///   checked against the data at resolve time.
/// - `max_iter`: node budget handed to the MILP engine.
/// - `constraints`: linear bounds over `d` and `N[i]`, interpreted at
///   assembly time.
/// - `verbose`: if `true`, the resolver and engine print progress lines.
///
/// Constructors:
/// - `build(n_obs, max_iter, extra_constraints) -> RangingResult<Self>` —
///   the standard path; always includes the defaults `d >= 0` and
///   `N[i] >= 0` for every `i`, then appends the extras verbatim.
/// - `new(n_obs) -> RangingResult<Self>` — `build` with the default
///   budget and no extras.
///
/// The fields are public so callers with unusual needs (e.g. permitting
/// negative cycle counts) can assemble options directly, bypassing the
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverOptions {
    pub n_obs: usize,
    pub max_iter: usize,
    pub constraints: Vec<Constraint>,
    pub verbose: bool,
}

impl ResolverOptions {
    /// Build the standard configuration for `n_obs` observations.
    ///
    /// Default constraints `d >= 0` and `N[i] >= 0` are always included;
    /// `extra_constraints` are appended verbatim after them. Constraint
    /// shape (cycle indices, finite bounds) is validated at assembly time,
    /// not here, so contradictory extras still build and surface as
    /// infeasibility from the solve.
    ///
    /// # Errors
    /// - [`RangingError::EmptyInput`] if `n_obs` is zero.
    /// - [`RangingError::InvalidMaxIter`] if `max_iter` is zero.
    pub fn build(
        n_obs: usize, max_iter: usize, extra_constraints: Vec<Constraint>,
    ) -> RangingResult<Self> {
        if n_obs == 0 {
            return Err(RangingError::EmptyInput { quantity: "observations (n_obs)" });
        }
        validate_max_iter(max_iter)?;

        let mut constraints = Vec::with_capacity(1 + n_obs + extra_constraints.len());
        constraints.push(Constraint::distance_ge(0.0));
        for index in 0..n_obs {
            constraints.push(Constraint::cycle_ge(index, 0.0));
        }
        constraints.extend(extra_constraints);

        Ok(Self { n_obs, max_iter, constraints, verbose: false })
    }

    /// Standard configuration with the default node budget and no extras.
    ///
    /// # Errors
    /// Same as [`ResolverOptions::build`].
    pub fn new(n_obs: usize) -> RangingResult<Self> {
        Self::build(n_obs, DEFAULT_MAX_ITER, Vec::new())
    }
}
