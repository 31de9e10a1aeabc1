//! Closed constraint grammar for the ambiguity resolver.
//!
//! Constraints are linear bounds over the two decision-variable families:
//! the distance scalar `d` and the cycle-count vector `N`. The grammar is a
//! closed AST rather than anything evaluated dynamically, which keeps the
//! set serializable and testable in isolation:
//!
//! - **[`VarRef`]**: which variable a bound addresses (`Distance` or
//!   `Cycle(i)`).
//! - **[`Comparator`]**: `Le`, `Ge`, or `Eq` against a constant.
//! - **[`Constraint`]**: one `(var, cmp, bound)` triple; build them with
//!   the associated constructors (e.g. [`Constraint::distance_le`]).
//! - **[`fold_bounds`]**: interpret a constraint list into per-variable
//!   boxes consumed by problem assembly.
//!
//! Folding validates shape (cycle indices in range, finite bounds) but
//! never feasibility: contradictory bounds produce a crossed box that the
//! engine reports as infeasible at solve time.
use serde::{Deserialize, Serialize};

use crate::ranging::errors::{RangingError, RangingResult};

/// Decision variable addressed by a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarRef {
    /// The distance scalar `d`.
    Distance,
    /// The cycle count `N[i]` for observation `i`.
    Cycle(usize),
}

/// Comparison direction against the constant bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Le,
    Ge,
    Eq,
}

/// One linear bound: `var cmp bound`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub var: VarRef,
    pub cmp: Comparator,
    pub bound: f64,
}

impl Constraint {
    /// `d <= bound`.
    pub fn distance_le(bound: f64) -> Self {
        Self { var: VarRef::Distance, cmp: Comparator::Le, bound }
    }

    /// `d >= bound`.
    pub fn distance_ge(bound: f64) -> Self {
        Self { var: VarRef::Distance, cmp: Comparator::Ge, bound }
    }

    /// `d == bound`.
    pub fn distance_eq(bound: f64) -> Self {
        Self { var: VarRef::Distance, cmp: Comparator::Eq, bound }
    }

    /// `N[index] <= bound`.
    pub fn cycle_le(index: usize, bound: f64) -> Self {
        Self { var: VarRef::Cycle(index), cmp: Comparator::Le, bound }
    }

    /// `N[index] >= bound`.
    pub fn cycle_ge(index: usize, bound: f64) -> Self {
        Self { var: VarRef::Cycle(index), cmp: Comparator::Ge, bound }
    }

    /// `N[index] == bound`.
    pub fn cycle_eq(index: usize, bound: f64) -> Self {
        Self { var: VarRef::Cycle(index), cmp: Comparator::Eq, bound }
    }
}

/// Per-variable box produced by folding a constraint list.
///
/// `lower > upper` is representable and means the box is empty; the engine
/// reports that as infeasible at solve time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VarBounds {
    /// The unbounded box `(-inf, +inf)`.
    pub fn unbounded() -> Self {
        Self { lower: f64::NEG_INFINITY, upper: f64::INFINITY }
    }

    fn apply(&mut self, cmp: Comparator, bound: f64) {
        match cmp {
            Comparator::Ge => self.lower = self.lower.max(bound),
            Comparator::Le => self.upper = self.upper.min(bound),
            Comparator::Eq => {
                self.lower = self.lower.max(bound);
                self.upper = self.upper.min(bound);
            }
        }
    }
}

/// Fold a constraint list into one box for `d` and one per cycle count.
///
/// Bounds of the same direction intersect (the tightest wins); `Eq` pins
/// both sides. Boxes start unbounded, so any default such as `d >= 0`
/// must appear in the list itself.
///
/// # Errors
/// - [`RangingError::ConstraintIndexOutOfRange`] if a cycle constraint
///   addresses an index at or beyond `n_obs`.
/// - [`RangingError::InvalidConstraintBound`] if a bound is `NaN` or
///   infinite.
pub fn fold_bounds(
    constraints: &[Constraint], n_obs: usize,
) -> RangingResult<(VarBounds, Vec<VarBounds>)> {
    let mut distance = VarBounds::unbounded();
    let mut cycles = vec![VarBounds::unbounded(); n_obs];

    for constraint in constraints {
        if !constraint.bound.is_finite() {
            return Err(RangingError::InvalidConstraintBound {
                bound: constraint.bound,
                reason: "Constraint bounds must be finite.",
            });
        }
        match constraint.var {
            VarRef::Distance => distance.apply(constraint.cmp, constraint.bound),
            VarRef::Cycle(index) => {
                if index >= n_obs {
                    return Err(RangingError::ConstraintIndexOutOfRange {
                        cycle_index: index,
                        n_obs,
                    });
                }
                cycles[index].apply(constraint.cmp, constraint.bound);
            }
        }
    }

    Ok((distance, cycles))
}
