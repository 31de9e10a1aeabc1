//! resolver — assembly, solving, and extraction for the ambiguity fit.
//!
//! The pipeline is three small stages behind [`resolve`] /
//! [`resolve_with`]:
//!
//! - **[`assemble`]**: fold constraints and build the weighted L1 MILP.
//! - **solve**: any [`crate::optimization::milp::MilpSolve`] engine; the
//!   bundled default is branch and bound over LP relaxations.
//! - **[`extract`]**: read the solution back into a validated
//!   [`crate::ranging::Resolution`], rounding cycle columns and
//!   recomputing unweighted residuals.
//!
//! Each stage is public so the fit can be assembled, inspected, or
//! extracted without going through the one-call API.
pub mod api;
pub mod assemble;
pub mod extract;

pub use self::api::{resolve, resolve_with, weighted_l1_objective};
pub use self::assemble::{assemble_problem, AssembledMilp};
pub use self::extract::extract_resolution;
